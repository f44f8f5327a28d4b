// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # postmill Providers
//!
//! Platform-specific implementations of
//! [`ProviderPublishing`](postmill_core::ProviderPublishing).
//!
//! Each provider module includes:
//!
//! - **Descriptor**: Static configuration (metadata, endpoints, polling plan)
//! - **OAuth**: Authorize URL, code exchange and refresh
//! - **Payload**: Typed settings and the publish payload
//! - **Error**: The platform's [`ResponseInspector`](postmill_transport::ResponseInspector)
//!
//! ## Supported Providers
//!
//! | Provider | Boards | Video | Photos | Publish | Analytics | Jobs |
//! |----------|--------|-------|--------|---------|-----------|------|
//! | Pinterest | ✅ | upload + poll | URL | sync | ✅ | 3 |
//! | TikTok | ❌ | pull from URL | URL | poll | ❌ | 1 |
//!
//! ## Usage
//!
//! ```ignore
//! use postmill_core::{JobControl, ProviderConfig, ProviderKind};
//! use postmill_providers::ProviderRegistry;
//! use postmill_transport::ProviderContext;
//!
//! let config = ProviderConfig::new(client_id, client_secret, "https://app.example.com");
//! let provider = ProviderRegistry::create(ProviderKind::Pinterest, config, ProviderContext::live()?)?;
//!
//! let result = provider.publish(&post, &credentials, &JobControl::new()).await?;
//! ```

pub mod descriptor;
pub mod oauth;
pub mod payload;
pub mod registry;
mod response;

// Provider modules (alphabetical)
pub mod pinterest;
pub mod tiktok;

// Re-export key types
pub use descriptor::{BuildFn, Endpoints, PollingPlan, ProviderDescriptor, ProviderDescriptorBuilder};
pub use payload::PayloadBuilder;
pub use registry::ProviderRegistry;

// Re-export provider descriptors
pub use pinterest::pinterest_descriptor;
pub use tiktok::tiktok_descriptor;

// Re-export providers
pub use pinterest::{PinterestProvider, PinterestSettings};
pub use tiktok::{CreatorInfo, PostingMethod, TikTokProvider, TikTokSettings};
