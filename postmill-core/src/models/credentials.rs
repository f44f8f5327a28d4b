//! OAuth credential types and scope validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

// ============================================================================
// Credentials
// ============================================================================

/// Fresh credentials returned by a code exchange or a refresh.
///
/// This core never stores credentials; the caller persists them and passes
/// them back in for every job.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Account id on the platform.
    pub platform_user_id: String,
    /// Name shown for the account.
    pub display_name: String,
    /// Bearer token for API calls.
    pub access_token: String,
    /// Token used to obtain a new access token, if the platform issued one.
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    pub expires_in_seconds: u64,
    /// Profile image URL.
    pub avatar_url: Option<String>,
    /// Handle of the account.
    pub username: String,
    /// Scopes the platform reported as granted (empty after most refreshes).
    #[serde(default)]
    pub granted_scopes: Vec<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("platform_user_id", &self.platform_user_id)
            .field("display_name", &self.display_name)
            .field("access_token", &"[redacted]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[redacted]"))
            .field("expires_in_seconds", &self.expires_in_seconds)
            .field("avatar_url", &self.avatar_url)
            .field("username", &self.username)
            .field("granted_scopes", &self.granted_scopes)
            .finish()
    }
}

// ============================================================================
// Authorization Request
// ============================================================================

/// A single-use authorization request.
///
/// The caller redirects the user to `authorize_url`, keeps `code_verifier`
/// for the exchange and checks that the callback echoes `state`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    /// URL the user is sent to.
    pub authorize_url: String,
    /// Verifier passed back to `exchange_code`.
    pub code_verifier: String,
    /// Opaque value the platform echoes to the redirect URI.
    pub state: String,
}

impl fmt::Debug for AuthorizationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationRequest")
            .field("authorize_url", &self.authorize_url)
            .field("code_verifier", &"[redacted]")
            .field("state", &self.state)
            .finish()
    }
}

// ============================================================================
// Scope Validation
// ============================================================================

/// Fails with [`ProviderError::ScopeMismatch`] unless `granted ⊇ required`.
///
/// Missing scopes are reported in the order they appear in `required`.
pub fn validate_scopes<G, R>(granted: &[G], required: &[R]) -> Result<(), ProviderError>
where
    G: AsRef<str>,
    R: AsRef<str>,
{
    let missing: Vec<String> = required
        .iter()
        .map(AsRef::as_ref)
        .filter(|r| !granted.iter().any(|g| g.as_ref() == *r))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ProviderError::ScopeMismatch {
            missing,
            granted: granted.iter().map(|g| g.as_ref().to_string()).collect(),
        })
    }
}

/// Splits a platform scope string on commas and whitespace.
///
/// Platforms disagree on the delimiter (`"a,b"` vs `"a b"`).
pub fn parse_scope_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
