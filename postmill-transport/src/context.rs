//! Provider context bundling the downward collaborators.
//!
//! Every provider receives one [`ProviderContext`] at construction and uses
//! it for all network calls, sleeps and identifier generation.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::error::TransportError;
use crate::http::{HttpClient, Transport};
use crate::ids::{IdSource, SecureIdSource};

// ============================================================================
// Provider Context
// ============================================================================

/// Collaborators a provider needs from its host.
#[derive(Clone)]
pub struct ProviderContext {
    /// HTTP transport.
    pub transport: Arc<dyn Transport>,
    /// Clock and sleep primitive.
    pub clock: Arc<dyn Clock>,
    /// Source of unguessable identifiers.
    pub ids: Arc<dyn IdSource>,
}

impl ProviderContext {
    /// Creates a context with the live HTTP client, wall clock and CSPRNG.
    pub fn live() -> Result<Self, TransportError> {
        Ok(Self {
            transport: Arc::new(HttpClient::new()?),
            clock: Arc::new(SystemClock),
            ids: Arc::new(SecureIdSource::new()),
        })
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> ProviderContextBuilder {
        ProviderContextBuilder::new()
    }
}

impl std::fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderContext").finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ProviderContext`].
///
/// Collaborators left unset fall back to the live implementations.
#[derive(Default)]
pub struct ProviderContextBuilder {
    transport: Option<Arc<dyn Transport>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdSource>>,
}

impl ProviderContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the id source.
    pub fn ids(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Builds the context.
    pub fn build(self) -> Result<ProviderContext, TransportError> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpClient::new()?),
        };
        Ok(ProviderContext {
            transport,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            ids: self.ids.unwrap_or_else(|| Arc::new(SecureIdSource::new())),
        })
    }
}
