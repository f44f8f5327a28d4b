//! Pinterest error signatures.

use postmill_transport::{BodySignal, ResponseInspector};
use serde::Deserialize;

/// Substring Pinterest returns when a video pin has no cover image.
const MISSING_COVER: &str = "cover_image_url or cover_image_content_type";

/// Remediation hint for [`MISSING_COVER`].
pub const MISSING_COVER_HINT: &str =
    "When uploading a video, you must add also an image to be used as a cover image.";

/// Pinterest's error code for a rejected access token.
const AUTHENTICATION_FAILED_CODE: i64 = 2;

#[derive(Debug, Deserialize)]
struct PinterestErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Recognizes Pinterest's error bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinterestInspector;

impl ResponseInspector for PinterestInspector {
    fn inspect(&self, status: u16, body: &str) -> Option<BodySignal> {
        if body.contains(MISSING_COVER) {
            return Some(BodySignal::MalformedRequest(MISSING_COVER_HINT.to_string()));
        }

        if (200..300).contains(&status) {
            return None;
        }

        let parsed: PinterestErrorBody = serde_json::from_str(body).ok()?;
        let auth_failed = parsed.code == Some(AUTHENTICATION_FAILED_CODE)
            || parsed
                .message
                .as_deref()
                .is_some_and(|m| m.starts_with("Authentication failed"));
        auth_failed.then_some(BodySignal::CredentialExpired)
    }
}
