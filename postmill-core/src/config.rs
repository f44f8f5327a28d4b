//! Explicit provider configuration.
//!
//! Every provider is constructed from a [`ProviderConfig`]; nothing is read
//! from the process environment.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ProviderError;
use crate::models::{ProviderKind, ProviderMetadata};

/// Default upper bound for a publish job that polls an asynchronous handle.
pub const DEFAULT_PUBLISH_TIMEOUT_SECS: u64 = 600;

/// Configuration for one provider integration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OAuth client id (TikTok calls it the client key).
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Public base URL of the application; the redirect URI is derived from it.
    pub redirect_base_url: String,
    /// Overrides the platform's required scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    /// Overrides the platform's admission cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_jobs: Option<usize>,
    /// Overrides the API base URL (sandbox endpoints, tests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// Upper bound for publish jobs whose caller supplied no deadline.
    #[serde(default = "default_publish_timeout_secs")]
    pub publish_timeout_secs: u64,
}

fn default_publish_timeout_secs() -> u64 {
    DEFAULT_PUBLISH_TIMEOUT_SECS
}

impl ProviderConfig {
    /// Creates a configuration with the three mandatory values.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_base_url: redirect_base_url.into(),
            scopes: None,
            max_concurrent_jobs: None,
            api_base_url: None,
            publish_timeout_secs: DEFAULT_PUBLISH_TIMEOUT_SECS,
        }
    }

    /// Sets the API base URL override.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Sets the scope override.
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the admission cap override.
    pub fn with_max_concurrent_jobs(mut self, cap: usize) -> Self {
        self.max_concurrent_jobs = Some(cap);
        self
    }

    /// Sets the publish timeout.
    pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout_secs = timeout.as_secs();
        self
    }

    /// Publish timeout as a duration.
    pub fn publish_timeout(&self) -> Duration {
        Duration::from_secs(self.publish_timeout_secs)
    }

    /// Redirect URI registered with the platform for `kind`.
    pub fn redirect_uri(&self, kind: ProviderKind) -> String {
        format!(
            "{}/integrations/social/{}",
            self.redirect_base_url.trim_end_matches('/'),
            kind.identifier()
        )
    }

    /// Scopes to request and require: the override, or the platform default.
    pub fn effective_scopes(&self, metadata: &ProviderMetadata) -> Vec<String> {
        self.scopes
            .clone()
            .unwrap_or_else(|| metadata.required_scopes.clone())
    }

    /// Admission cap: the override, or the platform default (never zero).
    pub fn effective_max_concurrent_jobs(&self, metadata: &ProviderMetadata) -> usize {
        self.max_concurrent_jobs
            .unwrap_or(metadata.max_concurrent_jobs)
            .max(1)
    }

    /// API base URL: the override, or `default`.
    pub fn api_base<'a>(&'a self, default: &'a str) -> &'a str {
        self.api_base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
    }

    /// Checks the configuration for obvious mistakes.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.client_id.trim().is_empty() {
            return Err(ProviderError::Config("client_id is empty".to_string()));
        }
        if self.client_secret.trim().is_empty() {
            return Err(ProviderError::Config("client_secret is empty".to_string()));
        }

        let base = Url::parse(&self.redirect_base_url).map_err(|e| {
            ProviderError::Config(format!("redirect_base_url is not a URL: {e}"))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ProviderError::Config(format!(
                "redirect_base_url must be http(s), got {}",
                base.scheme()
            )));
        }

        if let Some(api) = &self.api_base_url {
            Url::parse(api)
                .map_err(|e| ProviderError::Config(format!("api_base_url is not a URL: {e}")))?;
        }

        if self.publish_timeout_secs == 0 {
            return Err(ProviderError::Config(
                "publish_timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("redirect_base_url", &self.redirect_base_url)
            .field("scopes", &self.scopes)
            .field("max_concurrent_jobs", &self.max_concurrent_jobs)
            .field("api_base_url", &self.api_base_url)
            .field("publish_timeout_secs", &self.publish_timeout_secs)
            .finish()
    }
}
