//! Pin payload shaping.

use postmill_core::{MediaPlan, ProviderError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::payload::PayloadBuilder;

// ============================================================================
// Settings
// ============================================================================

/// Pinterest-specific post settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinterestSettings {
    /// Board the pin is created on (required).
    #[serde(default)]
    pub board: Option<String>,
    /// Destination link of the pin.
    #[serde(default)]
    pub link: Option<String>,
    /// Pin title.
    #[serde(default)]
    pub title: Option<String>,
    /// Placeholder color shown while the image loads, e.g. `#6E7874`.
    #[serde(default)]
    pub dominant_color: Option<String>,
    /// Accessibility text.
    #[serde(default)]
    pub alt_text: Option<String>,
}

impl PinterestSettings {
    /// Returns the board id, failing when it is absent or blank.
    pub fn board_id(&self) -> Result<&str, ProviderError> {
        self.board
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| ProviderError::malformed("A Pinterest board must be selected"))
    }
}

// ============================================================================
// Media Source
// ============================================================================

/// Shape of the pin's `media_source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MediaSource<'a> {
    /// Processed video, with an optional cover image URL.
    Video {
        media_id: &'a str,
        cover_image_url: Option<&'a str>,
    },
    /// One image by URL.
    ImageUrl(&'a str),
    /// Several images by URL, in declared order.
    MultipleImageUrls(Vec<&'a str>),
}

impl<'a> MediaSource<'a> {
    /// Picks the strategy for a post.
    ///
    /// `media_id` is the processed video, present iff the plan has a video.
    pub fn choose(plan: &MediaPlan<'a>, media_id: Option<&'a str>) -> Result<Self, ProviderError> {
        if let Some(media_id) = media_id {
            return Ok(Self::Video {
                media_id,
                cover_image_url: plan.cover().map(|c| c.path.as_str()),
            });
        }

        match plan.images.as_slice() {
            [] => Err(ProviderError::malformed("A pin needs an image or a video")),
            [single] => Ok(Self::ImageUrl(single.path.as_str())),
            many => Ok(Self::MultipleImageUrls(
                many.iter().map(|m| m.path.as_str()).collect(),
            )),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Video {
                media_id,
                cover_image_url,
            } => PayloadBuilder::new()
                .field("source_type", "video_id")
                .field("media_id", *media_id)
                .text("cover_image_url", *cover_image_url)
                .build(),
            Self::ImageUrl(url) => json!({ "source_type": "image_url", "url": url }),
            Self::MultipleImageUrls(urls) => json!({
                "source_type": "multiple_image_urls",
                "items": urls.iter().map(|url| json!({ "url": url })).collect::<Vec<_>>(),
            }),
        }
    }
}

/// Builds the `POST /v5/pins` body.
pub(crate) fn pin_payload(
    message: &str,
    settings: &PinterestSettings,
    source: &MediaSource<'_>,
) -> Result<Value, ProviderError> {
    Ok(PayloadBuilder::new()
        .field("board_id", settings.board_id()?)
        .field("description", message)
        .text("link", settings.link.as_deref())
        .text("title", settings.title.as_deref())
        .text("dominant_color", settings.dominant_color.as_deref())
        .text("alt_text", settings.alt_text.as_deref())
        .field("media_source", source.to_json())
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use postmill_core::{MediaRef, PostDescription};

    const OPTIONAL: [&str; 4] = ["link", "title", "dominant_color", "alt_text"];

    fn settings_with(mask: u8) -> PinterestSettings {
        let pick = |bit: u8, value: &str| (mask & (1 << bit) != 0).then(|| value.to_string());
        PinterestSettings {
            board: Some("board-1".into()),
            link: pick(0, "https://example.com"),
            title: pick(1, "Title"),
            dominant_color: pick(2, "#112233"),
            alt_text: pick(3, "A red bicycle"),
        }
    }

    #[test]
    fn test_absent_optional_fields_never_appear() {
        let source = MediaSource::ImageUrl("https://cdn.example.com/a.png");
        // Every combination of present and absent optional fields.
        for mask in 0u8..16 {
            let payload = pin_payload("hello", &settings_with(mask), &source).unwrap();
            let text = serde_json::to_string(&payload).unwrap();
            let reparsed: Value = serde_json::from_str(&text).unwrap();
            let object = reparsed.as_object().unwrap();

            for (bit, key) in OPTIONAL.iter().enumerate() {
                assert_eq!(object.contains_key(*key), mask & (1 << bit) != 0, "{key} mask={mask}");
            }
            assert!(object.values().all(|v| !v.is_null()));
            assert_eq!(object["board_id"], "board-1");
            assert_eq!(object["description"], "hello");
        }
    }

    #[test]
    fn test_blank_optional_is_omitted() {
        let settings = PinterestSettings {
            board: Some("b".into()),
            title: Some(String::new()),
            ..PinterestSettings::default()
        };
        let payload = pin_payload("m", &settings, &MediaSource::ImageUrl("u")).unwrap();
        assert!(payload.get("title").is_none());
    }

    #[test]
    fn test_board_required() {
        let err = pin_payload("m", &PinterestSettings::default(), &MediaSource::ImageUrl("u"))
            .unwrap_err();
        assert!(matches!(err, ProviderError::MalformedRequest { status: None, .. }));
    }

    #[test]
    fn test_strategy_table() {
        let single = PostDescription::new("p", "m").with_media(MediaRef::new("https://x/1.jpg"));
        let plan = single.media_plan().unwrap();
        assert_eq!(
            MediaSource::choose(&plan, None).unwrap(),
            MediaSource::ImageUrl("https://x/1.jpg")
        );

        let gallery = PostDescription::new("p", "m")
            .with_media(MediaRef::new("https://x/1.jpg"))
            .with_media(MediaRef::new("https://x/2.jpg"));
        let plan = gallery.media_plan().unwrap();
        let source = MediaSource::choose(&plan, None).unwrap();
        assert_eq!(source.to_json()["items"], json!([{"url": "https://x/1.jpg"}, {"url": "https://x/2.jpg"}]));

        let video = PostDescription::new("p", "m")
            .with_media(MediaRef::new("https://x/v.mp4"))
            .with_media(MediaRef::new("https://x/cover.jpg"));
        let plan = video.media_plan().unwrap();
        let source = MediaSource::choose(&plan, Some("m-9")).unwrap();
        assert_eq!(
            source.to_json(),
            json!({"source_type": "video_id", "media_id": "m-9", "cover_image_url": "https://x/cover.jpg"})
        );

        let bare = PostDescription::new("p", "m").with_media(MediaRef::new("https://x/v.mp4"));
        let plan = bare.media_plan().unwrap();
        let source = MediaSource::choose(&plan, Some("m-9")).unwrap();
        assert!(source.to_json().get("cover_image_url").is_none());
    }

    #[test]
    fn test_no_media_is_malformed() {
        let post = PostDescription::new("p", "m");
        let plan = post.media_plan().unwrap();
        assert!(MediaSource::choose(&plan, None).is_err());
    }
}
