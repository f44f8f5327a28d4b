//! Response classification.
//!
//! Statuses alone are not enough: some platforms answer HTTP 200 with an
//! error document. Each provider supplies a [`ResponseInspector`] that looks
//! at the raw body first; the status code decides only when the inspector
//! stays silent.

use postmill_core::ProviderError;
use tracing::debug;

use crate::http::HttpResponse;

/// What an inspector recognized in a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySignal {
    /// The payload is missing something; carries a remediation hint.
    MalformedRequest(String),
    /// The access token was rejected.
    CredentialExpired,
    /// The platform reported a failure that fits no other class.
    ProviderFailure,
}

/// Platform-specific body inspection hook.
pub trait ResponseInspector: Send + Sync {
    /// Returns a signal if the body matches a known failure signature.
    ///
    /// Called for every response, successful statuses included.
    fn inspect(&self, status: u16, body: &str) -> Option<BodySignal>;
}

/// Inspector that recognizes nothing; classification uses the status only.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusOnly;

impl ResponseInspector for StatusOnly {
    fn inspect(&self, _status: u16, _body: &str) -> Option<BodySignal> {
        None
    }
}

/// Classifies a status and body into an error, or `None` on success.
///
/// Order of precedence:
/// 1. The inspector's signal, if any
/// 2. `401` → [`ProviderError::CredentialExpired`]
/// 3. Any other non-2xx → [`ProviderError::UnclassifiedProvider`]
pub fn classify(
    status: u16,
    body: &str,
    inspector: &dyn ResponseInspector,
) -> Option<ProviderError> {
    if let Some(signal) = inspector.inspect(status, body) {
        debug!(status, ?signal, "Response matched a body signature");
        return Some(match signal {
            BodySignal::MalformedRequest(hint) => ProviderError::MalformedRequest {
                hint,
                status: Some(status),
                body: Some(body.to_string()),
            },
            BodySignal::CredentialExpired => ProviderError::CredentialExpired {
                status,
                body: body.to_string(),
            },
            BodySignal::ProviderFailure => ProviderError::UnclassifiedProvider {
                status,
                body: body.to_string(),
            },
        });
    }

    match status {
        200..=299 => None,
        401 => Some(ProviderError::CredentialExpired {
            status,
            body: body.to_string(),
        }),
        _ => Some(ProviderError::UnclassifiedProvider {
            status,
            body: body.to_string(),
        }),
    }
}

/// Passes a response through when it classifies as success.
pub fn ensure_success(
    response: HttpResponse,
    inspector: &dyn ResponseInspector,
) -> Result<HttpResponse, ProviderError> {
    match classify(response.status, &response.text(), inspector) {
        Some(err) => Err(err),
        None => Ok(response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CoverHint;

    impl ResponseInspector for CoverHint {
        fn inspect(&self, _status: u16, body: &str) -> Option<BodySignal> {
            if body.contains("cover_image_url") {
                Some(BodySignal::MalformedRequest("add a cover".into()))
            } else if body.contains("\"code\":\"expired\"") {
                Some(BodySignal::CredentialExpired)
            } else {
                None
            }
        }
    }

    #[test]
    fn test_status_only() {
        assert!(classify(200, "{}", &StatusOnly).is_none());
        assert!(classify(204, "", &StatusOnly).is_none());
        assert!(matches!(
            classify(401, "nope", &StatusOnly),
            Some(ProviderError::CredentialExpired { status: 401, .. })
        ));
        // Only 401 means the token is dead; 403 is left to the provider.
        assert!(matches!(
            classify(403, "forbidden", &StatusOnly),
            Some(ProviderError::UnclassifiedProvider { status: 403, .. })
        ));
        match classify(503, "down", &StatusOnly) {
            Some(ProviderError::UnclassifiedProvider { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "down");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_inspector_wins_over_status() {
        let err = classify(400, r#"{"message":"cover_image_url required"}"#, &CoverHint).unwrap();
        match err {
            ProviderError::MalformedRequest { hint, status, body } => {
                assert_eq!(hint, "add a cover");
                assert_eq!(status, Some(400));
                assert!(body.unwrap().contains("cover_image_url"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_error_payload_on_200() {
        let err = classify(200, r#"{"code":"expired"}"#, &CoverHint).unwrap();
        assert!(err.requires_refresh());
    }

    #[test]
    fn test_ensure_success_passes_body_through() {
        let ok = ensure_success(HttpResponse::new(200, "hello"), &StatusOnly).unwrap();
        assert_eq!(ok.text(), "hello");
        assert!(ensure_success(HttpResponse::new(500, ""), &StatusOnly).is_err());
    }
}
