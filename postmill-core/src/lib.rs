// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # postmill Core
//!
//! Core types, models, and the provider contract for postmill.
//!
//! This crate provides the foundational abstractions used across all other
//! postmill crates, including:
//!
//! - Domain models (credentials, posts, media, results, analytics)
//! - The [`ProviderError`] taxonomy
//! - The [`ProviderPublishing`] capability trait
//! - Explicit [`ProviderConfig`] and per-job [`JobControl`]
//!
//! ## Key Types
//!
//! ### Credentials
//! - [`Credentials`] - Tokens and profile returned by exchange/refresh
//! - [`AuthorizationRequest`] - Authorize URL, state and code verifier
//! - [`validate_scopes`] - Granted ⊇ required check
//!
//! ### Publishing
//! - [`PostDescription`] / [`MediaRef`] - Normalized input
//! - [`MediaUploadState`] / [`MediaStatus`] - Upload state machine
//! - [`PublishResult`] - Normalized output
//!
//! ### Analytics
//! - [`AnalyticsSeries`] - One metric over time
//! - [`reshape_daily_metrics`] - Per-day report → per-metric series

pub mod config;
pub mod control;
pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::{ProcessingFailure, ProviderError};

// Re-export configuration
pub use config::{DEFAULT_PUBLISH_TIMEOUT_SECS, ProviderConfig};
pub use control::JobControl;

// Re-export all model types
pub use models::{
    // Provider types
    DEFAULT_MAX_CONCURRENT_JOBS,
    ProviderKind,
    ProviderMetadata,
    // Credentials
    AuthorizationRequest,
    Credentials,
    parse_scope_list,
    validate_scopes,
    // Posts and media
    InvalidTransition,
    MediaPlan,
    MediaRef,
    MediaStatus,
    MediaUploadState,
    PostDescription,
    // Results
    Board,
    PublishResult,
    PublishStatus,
    // Analytics
    AnalyticsPoint,
    AnalyticsSeries,
    DailyMetrics,
    MetricSpec,
    reshape_daily_metrics,
};

// Re-export traits
pub use traits::ProviderPublishing;
