//! Core error types for postmill.
//!
//! [`ProviderError`] is the single taxonomy every provider operation returns.
//! Variants that originate from a platform response keep the HTTP status and
//! the raw body so a failure can be diagnosed offline without re-querying
//! the platform.

use std::fmt;

use thiserror::Error;

use crate::models::InvalidTransition;

// ============================================================================
// Processing Failure
// ============================================================================

/// Why an asynchronous processing poll stopped without success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingFailure {
    /// The platform reported its terminal failure status.
    ReportedFailure,
    /// The attempt budget ran out before a terminal status was seen.
    AttemptsExhausted,
    /// The caller-supplied deadline passed.
    DeadlineExceeded,
    /// The caller cancelled the job.
    Cancelled,
}

impl fmt::Display for ProcessingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ReportedFailure => "platform reported failure",
            Self::AttemptsExhausted => "attempt budget exhausted",
            Self::DeadlineExceeded => "deadline exceeded",
            Self::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

// ============================================================================
// Provider Error
// ============================================================================

/// Error type for all provider publishing operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The token endpoint answered without an access token.
    #[error("Token exchange returned no access token (HTTP {status})")]
    AuthExchange {
        /// HTTP status of the token response.
        status: u16,
        /// Raw token response body.
        body: String,
    },

    /// Granted scopes do not cover the required scopes.
    #[error("Missing required scopes: {}", missing.join(", "))]
    ScopeMismatch {
        /// Required scopes that were not granted, in required order.
        missing: Vec<String>,
        /// Scopes the platform reported as granted.
        granted: Vec<String>,
    },

    /// The access token was rejected; the caller must refresh and retry.
    #[error("Credentials expired or revoked (HTTP {status})")]
    CredentialExpired {
        /// HTTP status of the rejected call.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The platform rejected the payload shape.
    #[error("Malformed request: {hint}")]
    MalformedRequest {
        /// Human-readable remediation hint.
        hint: String,
        /// HTTP status, if the rejection came from the platform.
        status: Option<u16>,
        /// Raw response body, if any.
        body: Option<String>,
    },

    /// Uploaded media or an asynchronous publish job never reached success.
    #[error("Processing of {reference} failed after {attempts} attempt(s): {reason} (last status: {last_status})")]
    MediaProcessing {
        /// Media id or publish job id being polled.
        reference: String,
        /// Why polling stopped.
        reason: ProcessingFailure,
        /// Last status string observed from the platform.
        last_status: String,
        /// Raw body of the last status response.
        body: String,
        /// Number of status checks performed.
        attempts: u32,
    },

    /// Opaque platform failure.
    #[error("Provider error (HTTP {status}): {body}")]
    UnclassifiedProvider {
        /// HTTP status of the failed call.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Network-level failure before a response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// An upload pipeline tried an illegal state transition. This is a bug in
    /// the provider, not a platform answer.
    #[error("Internal upload state error: {0}")]
    InvalidState(#[from] InvalidTransition),

    /// Invalid explicit configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The platform does not offer this operation.
    #[error("Operation not supported by {provider}: {operation}")]
    Unsupported {
        /// Provider identifier.
        provider: &'static str,
        /// Operation name.
        operation: &'static str,
    },
}

impl ProviderError {
    /// Builds a `MalformedRequest` raised locally, before any platform call.
    pub fn malformed(hint: impl Into<String>) -> Self {
        Self::MalformedRequest {
            hint: hint.into(),
            status: None,
            body: None,
        }
    }

    /// Returns true if retrying later (with backoff) may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UnclassifiedProvider { .. } | Self::Transport(_) | Self::MediaProcessing { .. }
        )
    }

    /// Returns true if the caller must refresh credentials before retrying.
    pub fn requires_refresh(&self) -> bool {
        matches!(self, Self::CredentialExpired { .. })
    }

    /// Returns true if retrying the same input can never succeed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::AuthExchange { .. }
                | Self::ScopeMismatch { .. }
                | Self::MalformedRequest { .. }
                | Self::Config(_)
                | Self::Unsupported { .. }
                | Self::InvalidState(_)
        )
    }

    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthExchange { status, .. }
            | Self::CredentialExpired { status, .. }
            | Self::UnclassifiedProvider { status, .. } => Some(*status),
            Self::MalformedRequest { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw response body attached to this error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::AuthExchange { body, .. }
            | Self::CredentialExpired { body, .. }
            | Self::MediaProcessing { body, .. }
            | Self::UnclassifiedProvider { body, .. } => Some(body),
            Self::MalformedRequest { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::malformed(format!("Invalid JSON: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaStatus;

    #[test]
    fn test_retry_classes_are_disjoint() {
        let errors = [
            ProviderError::AuthExchange { status: 200, body: "{}".into() },
            ProviderError::ScopeMismatch { missing: vec!["a".into()], granted: vec![] },
            ProviderError::CredentialExpired { status: 401, body: String::new() },
            ProviderError::malformed("bad"),
            ProviderError::MediaProcessing {
                reference: "m".into(),
                reason: ProcessingFailure::AttemptsExhausted,
                last_status: "processing".into(),
                body: String::new(),
                attempts: 10,
            },
            ProviderError::UnclassifiedProvider { status: 500, body: String::new() },
            ProviderError::Transport("reset".into()),
            ProviderError::InvalidState(InvalidTransition {
                from: MediaStatus::Succeeded,
                to: MediaStatus::Processing,
            }),
        ];

        for e in &errors {
            let classes = [e.is_retryable(), e.requires_refresh(), e.is_fatal()];
            assert_eq!(classes.iter().filter(|c| **c).count(), 1, "{e:?}");
        }
    }

    #[test]
    fn test_invalid_state_is_not_a_platform_failure() {
        let e: ProviderError = InvalidTransition {
            from: MediaStatus::Created,
            to: MediaStatus::Processing,
        }
        .into();
        assert!(matches!(e, ProviderError::InvalidState(_)));
        assert!(e.is_fatal());
        assert_eq!(e.status(), None);
        assert!(e.to_string().contains("created → processing"));
    }

    #[test]
    fn test_scope_mismatch_lists_missing() {
        let e = ProviderError::ScopeMismatch {
            missing: vec!["pins:write".into(), "boards:read".into()],
            granted: vec!["pins:read".into()],
        };
        assert_eq!(e.to_string(), "Missing required scopes: pins:write, boards:read");
    }

    #[test]
    fn test_context_accessors() {
        let e = ProviderError::UnclassifiedProvider { status: 502, body: "gateway".into() };
        assert_eq!(e.status(), Some(502));
        assert_eq!(e.body(), Some("gateway"));

        let local = ProviderError::malformed("no media");
        assert_eq!(local.status(), None);
        assert_eq!(local.body(), None);
    }
}
