//! Shared OAuth authorization-code helpers.
//!
//! Platforms differ in parameter names (`client_id` vs `client_key`) and in
//! how the client authenticates, but the authorize URL and the token
//! response are close enough to share parsing.

use postmill_core::{ProviderError, parse_scope_list};
use postmill_transport::{HttpResponse, ResponseInspector, classify};
use serde::Deserialize;
use tracing::warn;
use url::Url;

// ============================================================================
// Authorize URL
// ============================================================================

/// Appends `params` to `base` as a URL-encoded query string.
pub fn authorize_url(base: &str, params: &[(&str, &str)]) -> Result<String, ProviderError> {
    let url = Url::parse_with_params(base, params)
        .map_err(|e| ProviderError::Config(format!("invalid authorize URL {base}: {e}")))?;
    Ok(url.into())
}

// ============================================================================
// Token Response
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawTokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    open_id: Option<String>,
}

/// A successful token endpoint answer.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenGrant {
    /// Bearer token.
    pub access_token: String,
    /// Refresh token, if the platform issued (or rotated) one.
    pub refresh_token: Option<String>,
    /// Lifetime in seconds, if reported.
    pub expires_in: Option<u64>,
    /// Granted scopes, if reported.
    pub scopes: Vec<String>,
    /// Platform user id, if the token endpoint reports it.
    pub open_id: Option<String>,
}

impl std::fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGrant")
            .field("expires_in", &self.expires_in)
            .field("scopes", &self.scopes)
            .field("open_id", &self.open_id)
            .finish_non_exhaustive()
    }
}

/// Parses a token endpoint response.
///
/// Non-2xx answers (and bodies the inspector recognizes) go through the
/// classifier. A 2xx answer without a non-empty `access_token` is an
/// [`ProviderError::AuthExchange`] carrying the raw body.
pub fn parse_token_grant(
    response: &HttpResponse,
    inspector: &dyn ResponseInspector,
) -> Result<TokenGrant, ProviderError> {
    let body = response.text();
    if let Some(err) = classify(response.status, &body, inspector) {
        return Err(err);
    }

    let raw: RawTokenResponse = response.json().unwrap_or_default();
    let Some(access_token) = raw.access_token.filter(|t| !t.is_empty()) else {
        warn!(status = response.status, "Token response carried no access token");
        return Err(ProviderError::AuthExchange {
            status: response.status,
            body: body.into_owned(),
        });
    };

    Ok(TokenGrant {
        access_token,
        refresh_token: raw.refresh_token.filter(|t| !t.is_empty()),
        expires_in: raw.expires_in,
        scopes: raw.scope.as_deref().map(parse_scope_list).unwrap_or_default(),
        open_id: raw.open_id,
    })
}
