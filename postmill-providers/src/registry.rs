//! Provider registry for managing all provider descriptors.
//!
//! The registry provides static access to all provider configurations
//! and is the central point for looking up and instantiating providers.

use std::sync::OnceLock;

use postmill_core::{ProviderConfig, ProviderError, ProviderKind, ProviderPublishing};
use postmill_transport::ProviderContext;

use crate::descriptor::ProviderDescriptor;
use crate::pinterest::pinterest_descriptor;
use crate::tiktok::tiktok_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all provider descriptors.
static DESCRIPTORS: OnceLock<Vec<ProviderDescriptor>> = OnceLock::new();

fn init_descriptors() -> Vec<ProviderDescriptor> {
    vec![pinterest_descriptor(), tiktok_descriptor()]
}

// ============================================================================
// Provider Registry
// ============================================================================

/// Global registry of all provider descriptors.
///
/// The registry is initialized lazily on first access.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Returns all provider descriptors.
    pub fn all() -> &'static [ProviderDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a provider descriptor by kind.
    pub fn get(id: ProviderKind) -> Option<&'static ProviderDescriptor> {
        Self::all().iter().find(|d| d.id == id)
    }

    /// Looks up a provider by identifier (`pinterest`, `tiktok`).
    pub fn get_by_identifier(name: &str) -> Option<&'static ProviderDescriptor> {
        ProviderKind::from_identifier(name).and_then(Self::get)
    }

    /// Returns the number of registered providers.
    pub fn count() -> usize {
        Self::all().len()
    }

    /// Returns all provider kinds.
    pub fn kinds() -> Vec<ProviderKind> {
        Self::all().iter().map(|d| d.id).collect()
    }

    /// Builds the provider for `kind`.
    pub fn create(
        kind: ProviderKind,
        config: ProviderConfig,
        ctx: ProviderContext,
    ) -> Result<Box<dyn ProviderPublishing>, ProviderError> {
        let descriptor = Self::get(kind).ok_or_else(|| {
            ProviderError::Config(format!("no provider registered for {kind}"))
        })?;
        descriptor.instantiate(config, ctx)
    }
}

// ============================================================================
// Tests
// ============================================================================
