//! Normalized post description handed to a provider.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

/// File extensions treated as video when no MIME hint says otherwise.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm", "avi", "mkv"];

// ============================================================================
// Media Reference
// ============================================================================

/// One media item attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    /// Source URL of the media.
    pub path: String,
    /// MIME type hint, e.g. `video/mp4`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_hint: Option<String>,
    /// Frame to use as the video cover, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_timestamp_ms: Option<u64>,
}

impl MediaRef {
    /// Creates a media reference from a URL.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime_hint: None,
            thumbnail_timestamp_ms: None,
        }
    }

    /// Sets the MIME hint.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime_hint = Some(mime.into());
        self
    }

    /// Sets the cover frame timestamp.
    pub fn with_thumbnail_ms(mut self, ms: u64) -> Self {
        self.thumbnail_timestamp_ms = Some(ms);
        self
    }

    /// Returns true if this item is a video.
    ///
    /// The MIME hint wins when present; otherwise the path extension decides.
    pub fn is_video(&self) -> bool {
        if let Some(mime) = &self.mime_hint {
            return mime.trim().to_ascii_lowercase().starts_with("video/");
        }
        self.extension()
            .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Lowercased extension of the path, ignoring query and fragment.
    fn extension(&self) -> Option<String> {
        let path = self.path.split(['?', '#']).next().unwrap_or_default();
        let file = path.rsplit('/').next().unwrap_or_default();
        let (_, ext) = file.rsplit_once('.')?;
        Some(ext.to_ascii_lowercase())
    }
}

// ============================================================================
// Media Plan
// ============================================================================

/// Media of a post split into the video (if any) and the remaining images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPlan<'a> {
    /// The single video item.
    pub video: Option<&'a MediaRef>,
    /// Non-video items in declared order.
    pub images: Vec<&'a MediaRef>,
}

impl<'a> MediaPlan<'a> {
    /// First image, used as a video cover.
    pub fn cover(&self) -> Option<&'a MediaRef> {
        self.images.first().copied()
    }
}

// ============================================================================
// Post Description
// ============================================================================

/// One logical post to publish.
///
/// `settings` holds platform-specific configuration; each provider
/// deserializes it into its own typed settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDescription {
    /// Caller's id for the post.
    pub id: String,
    /// Text of the post.
    pub message: String,
    /// Media items in declared order.
    #[serde(default)]
    pub media: Vec<MediaRef>,
    /// Platform-specific settings.
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl PostDescription {
    /// Creates a post with no media and empty settings.
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            media: Vec::new(),
            settings: serde_json::Value::Null,
        }
    }

    /// Appends a media item.
    pub fn with_media(mut self, media: MediaRef) -> Self {
        self.media.push(media);
        self
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: serde_json::Value) -> Self {
        self.settings = settings;
        self
    }

    /// Classifies the media items.
    ///
    /// At most one video is accepted; a second one is a malformed request.
    pub fn media_plan(&self) -> Result<MediaPlan<'_>, ProviderError> {
        let mut video = None;
        let mut images = Vec::new();

        for item in &self.media {
            if item.is_video() {
                if video.is_some() {
                    return Err(ProviderError::malformed(
                        "Only one video can be attached to a post",
                    ));
                }
                video = Some(item);
            } else {
                images.push(item);
            }
        }

        Ok(MediaPlan { video, images })
    }

    /// Deserializes the settings into a provider's settings type.
    ///
    /// Missing settings deserialize from an empty object so that types with
    /// all-optional fields accept posts without settings.
    pub fn settings_as<T: DeserializeOwned>(&self) -> Result<T, ProviderError> {
        let value = if self.settings.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            self.settings.clone()
        };
        serde_json::from_value(value)
            .map_err(|e| ProviderError::malformed(format!("Invalid post settings: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_by_extension() {
        assert!(MediaRef::new("https://cdn.example.com/a/clip.mp4").is_video());
        assert!(MediaRef::new("https://cdn.example.com/clip.MOV?sig=abc").is_video());
        assert!(!MediaRef::new("https://cdn.example.com/photo.jpg").is_video());
        assert!(!MediaRef::new("https://cdn.example.com/mp4/photo.png").is_video());
        assert!(!MediaRef::new("https://cdn.example.com/noext").is_video());
    }

    #[test]
    fn test_mime_hint_wins() {
        assert!(MediaRef::new("https://cdn.example.com/stream").with_mime("video/mp4").is_video());
        assert!(!MediaRef::new("https://cdn.example.com/a.mp4").with_mime("image/jpeg").is_video());
    }

    #[test]
    fn test_media_plan_keeps_image_order() {
        let post = PostDescription::new("p1", "hi")
            .with_media(MediaRef::new("https://x/1.png"))
            .with_media(MediaRef::new("https://x/v.mp4"))
            .with_media(MediaRef::new("https://x/2.png"));

        let plan = post.media_plan().unwrap();
        assert_eq!(plan.video.map(|m| m.path.as_str()), Some("https://x/v.mp4"));
        let images: Vec<_> = plan.images.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(images, vec!["https://x/1.png", "https://x/2.png"]);
        assert_eq!(plan.cover().map(|m| m.path.as_str()), Some("https://x/1.png"));
    }

    #[test]
    fn test_two_videos_rejected() {
        let post = PostDescription::new("p1", "hi")
            .with_media(MediaRef::new("https://x/a.mp4"))
            .with_media(MediaRef::new("https://x/b.webm"));
        assert!(matches!(
            post.media_plan(),
            Err(ProviderError::MalformedRequest { .. })
        ));
    }

    #[test]
    fn test_settings_as_defaults_on_null() {
        #[derive(Deserialize, Default)]
        struct S {
            title: Option<String>,
        }
        let post = PostDescription::new("p", "m");
        let s: S = post.settings_as().unwrap();
        assert!(s.title.is_none());
    }
}
