//! TikTok provider descriptor.

use std::time::Duration;

use postmill_core::{ProviderConfig, ProviderKind, ProviderMetadata, ProviderPublishing};
use postmill_transport::{PollPolicy, ProviderContext};

use super::provider::TikTokProvider;
use crate::descriptor::{Endpoints, PollingPlan, ProviderDescriptor};

pub(crate) const AUTHORIZE_URL: &str = "https://www.tiktok.com/v2/auth/authorize/";

pub(crate) const API_BASE: &str = "https://open.tiktokapis.com";

/// Canonical video URL once TikTok reports a public post id.
pub(crate) const RELEASE_URL: &str = "https://www.tiktok.com/@{username}/video/{id}";

/// Profile URL, used while the post has no public id yet.
pub(crate) const PROFILE_URL: &str = "https://www.tiktok.com/@{username}";

/// Publish jobs: 6 s warm-up, then every 3 s until the deadline.
pub(crate) const PUBLISH_POLL: PollPolicy =
    PollPolicy::every(Duration::from_secs(3)).with_initial_delay(Duration::from_secs(6));

pub(crate) const ENDPOINTS: Endpoints = Endpoints {
    authorize_url: AUTHORIZE_URL,
    api_base: API_BASE,
    release_url_template: RELEASE_URL,
};

/// Creates the TikTok provider descriptor.
pub fn tiktok_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::TikTok,
        metadata: ProviderMetadata::for_provider(ProviderKind::TikTok),
        endpoints: ENDPOINTS,
        polling: PollingPlan {
            media: None,
            publish: Some(PUBLISH_POLL),
        },
        build: build_tiktok,
    }
}

fn build_tiktok(config: ProviderConfig, ctx: ProviderContext) -> Box<dyn ProviderPublishing> {
    Box::new(TikTokProvider::new(config, ctx))
}
