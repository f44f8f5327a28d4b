//! Pinterest provider descriptor.

use std::time::Duration;

use postmill_core::{ProviderConfig, ProviderKind, ProviderMetadata, ProviderPublishing};
use postmill_transport::{PollPolicy, ProviderContext};

use super::provider::PinterestProvider;
use crate::descriptor::{Endpoints, PollingPlan, ProviderDescriptor};

/// Consent page.
pub(crate) const AUTHORIZE_URL: &str = "https://www.pinterest.com/oauth/";

/// Production API.
pub(crate) const API_BASE: &str = "https://api.pinterest.com";

/// Canonical pin URL.
pub(crate) const RELEASE_URL: &str = "https://www.pinterest.com/pin/{id}";

/// Uploaded videos are checked every 30 seconds, at most 10 times.
pub(crate) const MEDIA_POLL: PollPolicy =
    PollPolicy::every(Duration::from_secs(30)).with_max_attempts(10);

pub(crate) const ENDPOINTS: Endpoints = Endpoints {
    authorize_url: AUTHORIZE_URL,
    api_base: API_BASE,
    release_url_template: RELEASE_URL,
};

/// Creates the Pinterest provider descriptor.
pub fn pinterest_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::Pinterest,
        metadata: ProviderMetadata::for_provider(ProviderKind::Pinterest),
        endpoints: ENDPOINTS,
        polling: PollingPlan {
            media: Some(MEDIA_POLL),
            publish: None,
        },
        build: build_pinterest,
    }
}

fn build_pinterest(config: ProviderConfig, ctx: ProviderContext) -> Box<dyn ProviderPublishing> {
    Box::new(PinterestProvider::new(config, ctx))
}
