//! Trait definitions for postmill.
//!
//! [`ProviderPublishing`] is the contract every platform integration
//! satisfies. Shared behavior (polling, error classification, payload
//! building) lives in free functions and helper types, not in a base type.

use async_trait::async_trait;

use crate::control::JobControl;
use crate::error::ProviderError;
use crate::models::{
    AnalyticsSeries, AuthorizationRequest, Board, Credentials, PostDescription, ProviderKind,
    ProviderMetadata, PublishResult, validate_scopes,
};

/// Capability interface of one social platform integration.
///
/// Implementors are responsible for:
/// - Running the OAuth authorization-code flow and refreshing tokens
/// - Uploading media and waiting for asynchronous processing
/// - Shaping and submitting the platform's publish payload
/// - Reshaping the platform's analytics report
///
/// Every method takes the access token or credentials it needs; providers
/// hold no per-user state.
#[async_trait]
pub trait ProviderPublishing: Send + Sync {
    /// Returns the kind of provider this implementation handles.
    fn kind(&self) -> ProviderKind;

    /// Static capabilities of the platform.
    fn metadata(&self) -> &ProviderMetadata;

    /// Scopes requested at authorization and required after exchange.
    fn required_scopes(&self) -> &[String];

    /// Maximum concurrently in-flight publish jobs the scheduler should admit.
    fn max_concurrent_jobs(&self) -> usize;

    /// Builds the URL the user is sent to, plus a fresh state and verifier.
    async fn build_authorization_request(&self) -> Result<AuthorizationRequest, ProviderError>;

    /// Exchanges an authorization code for credentials.
    ///
    /// Granted scopes are validated here, and only here.
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<Credentials, ProviderError>;

    /// Obtains a new access token from a refresh token.
    ///
    /// The result carries the rotated refresh token when the platform issued
    /// one, otherwise the one passed in.
    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, ProviderError>;

    /// Fails with `ScopeMismatch` unless `granted` covers [`Self::required_scopes`].
    fn validate_scopes(&self, granted: &[String]) -> Result<(), ProviderError> {
        validate_scopes(granted, self.required_scopes())
    }

    /// Lists the boards or channels posts can be published into.
    async fn list_boards(&self, access_token: &str) -> Result<Vec<Board>, ProviderError>;

    /// Publishes one post.
    ///
    /// Any failure aborts the remaining steps; nothing is retried here.
    async fn publish(
        &self,
        post: &PostDescription,
        credentials: &Credentials,
        control: &JobControl,
    ) -> Result<PublishResult, ProviderError>;

    /// Fetches the analytics report for the last `lookback_days` days.
    async fn fetch_analytics(
        &self,
        access_token: &str,
        lookback_days: u32,
    ) -> Result<Vec<AnalyticsSeries>, ProviderError>;
}
