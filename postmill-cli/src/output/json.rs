//! JSON output formatting.

use anyhow::Result;
use postmill_core::ProviderError;
use postmill_providers::ProviderDescriptor;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// Provider info output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfoOutput {
    pub id: String,
    pub display_name: String,
    pub required_scopes: Vec<String>,
    pub max_concurrent_jobs: usize,
    pub supports_boards: bool,
    pub supports_analytics: bool,
    pub authorize_url: String,
    pub website: String,
}

impl From<&ProviderDescriptor> for ProviderInfoOutput {
    fn from(desc: &ProviderDescriptor) -> Self {
        Self {
            id: desc.identifier().to_string(),
            display_name: desc.display_name().to_string(),
            required_scopes: desc.metadata.required_scopes.clone(),
            max_concurrent_jobs: desc.metadata.max_concurrent_jobs,
            supports_boards: desc.metadata.supports_boards,
            supports_analytics: desc.metadata.supports_analytics,
            authorize_url: desc.endpoints.authorize_url.to_string(),
            website: desc.metadata.website.clone(),
        }
    }
}

/// Failure output for scripted callers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub provider: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub retryable: bool,
    pub requires_refresh: bool,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the provider list.
    pub fn format_providers(&self, providers: &[ProviderDescriptor]) -> Result<String> {
        let outputs: Vec<ProviderInfoOutput> = providers.iter().map(ProviderInfoOutput::from).collect();
        self.format(&outputs)
    }

    /// Formats a provider failure with its status and raw body.
    pub fn format_error(&self, provider: &str, error: &ProviderError) -> Result<String> {
        self.format(&ErrorOutput {
            provider: provider.to_string(),
            error: error.to_string(),
            status: error.status(),
            body: error.body().map(str::to_string),
            retryable: error.is_retryable(),
            requires_refresh: error.requires_refresh(),
        })
    }
}
