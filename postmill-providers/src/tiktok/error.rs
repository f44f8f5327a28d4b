//! TikTok error signatures.
//!
//! TikTok wraps every API answer in an envelope:
//!
//! ```json
//! { "data": { ... }, "error": { "code": "ok", "message": "", "log_id": "..." } }
//! ```
//!
//! A failure may arrive with HTTP 200, so the `error.code` decides.

use postmill_transport::{BodySignal, ResponseInspector};
use serde_json::Value;

const OK: &str = "ok";

/// Codes meaning the token is no longer usable for this call.
const AUTH_CODES: &[&str] = &[
    "access_token_invalid",
    "scope_not_authorized",
    "scope_permission_missed",
];

const INVALID_PARAMS: &str = "invalid_params";

/// Recognizes TikTok's error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct TikTokInspector;

impl ResponseInspector for TikTokInspector {
    fn inspect(&self, _status: u16, body: &str) -> Option<BodySignal> {
        let envelope: Value = serde_json::from_str(body).ok()?;
        let error = envelope.get("error")?.as_object()?;
        let code = error.get("code")?.as_str()?;

        if code == OK {
            return None;
        }
        if AUTH_CODES.contains(&code) {
            return Some(BodySignal::CredentialExpired);
        }
        if code == INVALID_PARAMS {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("TikTok rejected the request parameters");
            return Some(BodySignal::MalformedRequest(message.to_string()));
        }
        Some(BodySignal::ProviderFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postmill_core::ProviderError;
    use postmill_transport::classify;

    #[test]
    fn test_ok_envelope_passes() {
        let body = r#"{"data":{"publish_id":"p"},"error":{"code":"ok","message":""}}"#;
        assert!(classify(200, body, &TikTokInspector).is_none());
    }

    #[test]
    fn test_auth_codes_require_refresh() {
        for code in AUTH_CODES {
            let body = format!(r#"{{"error":{{"code":"{code}","message":"x"}}}}"#);
            assert!(classify(200, &body, &TikTokInspector).unwrap().requires_refresh());
        }
    }

    #[test]
    fn test_error_on_success_status() {
        let body = r#"{"error":{"code":"spam_risk_too_many_posts","message":"slow down"}}"#;
        assert!(matches!(
            classify(200, body, &TikTokInspector),
            Some(ProviderError::UnclassifiedProvider { status: 200, .. })
        ));
    }

    #[test]
    fn test_invalid_params_is_malformed() {
        let body = r#"{"error":{"code":"invalid_params","message":"video_url is invalid"}}"#;
        match classify(400, body, &TikTokInspector) {
            Some(ProviderError::MalformedRequest { hint, status, .. }) => {
                assert_eq!(hint, "video_url is invalid");
                assert_eq!(status, Some(400));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_oauth_string_error_left_to_status() {
        // The token endpoint reports `error` as a plain string.
        let body = r#"{"error":"invalid_grant","error_description":"Authorization code is expired."}"#;
        assert!(TikTokInspector.inspect(200, body).is_none());
    }
}
