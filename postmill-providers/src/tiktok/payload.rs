//! TikTok settings and publish payload shaping.

use postmill_core::{MediaPlan, MediaRef, ProviderError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::api::PUBLISH_PATH;
use crate::payload::PayloadBuilder;

const DEFAULT_PRIVACY_LEVEL: &str = "PUBLIC_TO_EVERYONE";
const PULL_FROM_URL: &str = "PULL_FROM_URL";

// ============================================================================
// Settings
// ============================================================================

/// How the post reaches TikTok.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostingMethod {
    /// Published directly to the profile.
    #[default]
    DirectPost,
    /// Delivered to the creator's inbox to finish in the app.
    Upload,
}

/// TikTok-specific post settings.
///
/// Interaction toggles say whether duets, comments and stitches are
/// *allowed*; the payload carries the inverse (`disable_*`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TikTokSettings {
    /// One of the creator's allowed privacy levels.
    #[serde(default)]
    pub privacy_level: Option<String>,
    /// Allow duets.
    #[serde(default)]
    pub duet: Option<bool>,
    /// Allow comments.
    #[serde(default)]
    pub comment: Option<bool>,
    /// Allow stitches.
    #[serde(default)]
    pub stitch: Option<bool>,
    /// Paid partnership disclosure.
    #[serde(default)]
    pub brand_content_toggle: Option<bool>,
    /// Promotes the creator's own business.
    #[serde(default)]
    pub brand_organic_toggle: Option<bool>,
    /// Let TikTok add music to photo posts.
    #[serde(default)]
    pub auto_add_music: Option<bool>,
    /// Direct post or inbox upload.
    #[serde(default)]
    pub content_posting_method: PostingMethod,
}

// ============================================================================
// Media
// ============================================================================

/// What is being posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TikTokMedia<'a> {
    /// A video pulled from its URL.
    Video(&'a MediaRef),
    /// A photo carousel, in declared order.
    Photos(Vec<&'a str>),
}

impl<'a> TikTokMedia<'a> {
    pub fn from_plan(plan: &MediaPlan<'a>) -> Result<Self, ProviderError> {
        if let Some(video) = plan.video {
            return Ok(Self::Video(video));
        }
        if plan.images.is_empty() {
            return Err(ProviderError::malformed("A TikTok post needs a video or photos"));
        }
        Ok(Self::Photos(plan.images.iter().map(|m| m.path.as_str()).collect()))
    }

    fn is_photo(&self) -> bool {
        matches!(self, Self::Photos(_))
    }
}

// ============================================================================
// Payload
// ============================================================================

/// Init endpoint and body of one publish.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PublishRequest {
    pub path: String,
    pub body: Value,
}

fn init_path(method: PostingMethod, media: &TikTokMedia<'_>) -> String {
    let suffix = match (method, media.is_photo()) {
        (_, true) => "/content/init/",
        (PostingMethod::DirectPost, false) => "/video/init/",
        (PostingMethod::Upload, false) => "/inbox/video/init/",
    };
    format!("{PUBLISH_PATH}{suffix}")
}

fn post_info(message: &str, settings: &TikTokSettings, media: &TikTokMedia<'_>) -> PayloadBuilder {
    let privacy = settings
        .privacy_level
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or(DEFAULT_PRIVACY_LEVEL);

    PayloadBuilder::new()
        .field("title", message)
        .field("privacy_level", privacy)
        .optional("disable_duet", settings.duet.map(|allow| !allow))
        .optional("disable_comment", settings.comment.map(|allow| !allow))
        .optional("disable_stitch", settings.stitch.map(|allow| !allow))
        .optional("brand_content_toggle", settings.brand_content_toggle)
        .optional("brand_organic_toggle", settings.brand_organic_toggle)
        .optional(
            "auto_add_music",
            settings.auto_add_music.filter(|_| media.is_photo()),
        )
}

fn source_info(media: &TikTokMedia<'_>) -> PayloadBuilder {
    let builder = PayloadBuilder::new().field("source", PULL_FROM_URL);
    match media {
        TikTokMedia::Video(video) => builder
            .field("video_url", video.path.as_str())
            .optional("video_cover_timestamp_ms", video.thumbnail_timestamp_ms),
        TikTokMedia::Photos(urls) => builder
            .field("photo_cover_index", 0)
            .field("photo_images", urls.clone()),
    }
}

/// Shapes the init call for a post.
pub(crate) fn publish_request(
    message: &str,
    settings: &TikTokSettings,
    media: &TikTokMedia<'_>,
) -> PublishRequest {
    let method = settings.content_posting_method;
    let path = init_path(method, media);

    let body = match (method, media) {
        // The inbox endpoint takes the source only; captions are set in the app.
        (PostingMethod::Upload, TikTokMedia::Video(_)) => {
            PayloadBuilder::new().object("source_info", source_info(media))
        }
        (_, TikTokMedia::Video(_)) => PayloadBuilder::new()
            .object("post_info", post_info(message, settings, media))
            .object("source_info", source_info(media))
            .field("post_mode", "DIRECT_POST")
            .field("media_type", "VIDEO"),
        (_, TikTokMedia::Photos(_)) => {
            let post_mode = match method {
                PostingMethod::DirectPost => "DIRECT_POST",
                PostingMethod::Upload => "MEDIA_UPLOAD",
            };
            PayloadBuilder::new()
                .object("post_info", post_info(message, settings, media))
                .object("source_info", source_info(media))
                .field("post_mode", post_mode)
                .field("media_type", "PHOTO")
        }
    }
    .build();

    PublishRequest { path, body }
}
