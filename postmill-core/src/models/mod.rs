//! Domain models for postmill.
//!
//! ## Submodules
//!
//! - [`provider`] - Provider types (ProviderKind, ProviderMetadata)
//! - [`credentials`] - OAuth credentials, authorization requests, scopes
//! - [`post`] - Post descriptions and media references
//! - [`media`] - Media upload state machine
//! - [`publish`] - Publish results and boards
//! - [`analytics`] - Analytics series and the daily-metrics reshaper

mod analytics;
mod credentials;
mod media;
mod post;
mod provider;
mod publish;

// Re-export everything at the models level
pub use analytics::{
    AnalyticsPoint, AnalyticsSeries, DailyMetrics, MetricSpec, reshape_daily_metrics,
};
pub use credentials::{AuthorizationRequest, Credentials, parse_scope_list, validate_scopes};
pub use media::{InvalidTransition, MediaStatus, MediaUploadState};
pub use post::{MediaPlan, MediaRef, PostDescription};
pub use provider::{DEFAULT_MAX_CONCURRENT_JOBS, ProviderKind, ProviderMetadata};
pub use publish::{Board, PublishResult, PublishStatus};
#[cfg(test)]
mod serde_tests;
