//! Provider descriptor system.
//!
//! A descriptor contains all the static configuration for a provider:
//! - Metadata (display name, scopes, admission cap, capabilities)
//! - Endpoints (authorize URL, API base, release URL template)
//! - Polling plan (media processing and publish job policies)
//! - A constructor for the live provider

use postmill_core::{ProviderConfig, ProviderError, ProviderKind, ProviderMetadata, ProviderPublishing};
use postmill_transport::{PollPolicy, ProviderContext};

/// Constructor stored in a descriptor.
pub type BuildFn = fn(ProviderConfig, ProviderContext) -> Box<dyn ProviderPublishing>;

// ============================================================================
// Provider Descriptor
// ============================================================================

/// Complete descriptor for a provider.
pub struct ProviderDescriptor {
    /// Provider identifier.
    pub id: ProviderKind,
    /// Static capabilities.
    pub metadata: ProviderMetadata,
    /// Well-known URLs.
    pub endpoints: Endpoints,
    /// How asynchronous platform work is awaited.
    pub polling: PollingPlan,
    /// Builds the provider.
    pub build: BuildFn,
}

impl ProviderDescriptor {
    /// Creates a new descriptor builder.
    pub fn builder(id: ProviderKind) -> ProviderDescriptorBuilder {
        ProviderDescriptorBuilder::new(id)
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        &self.metadata.display_name
    }

    /// Returns the identifier used in redirect URIs and on the CLI.
    pub fn identifier(&self) -> &'static str {
        self.id.identifier()
    }

    /// Validates `config` and builds the provider.
    pub fn instantiate(
        &self,
        config: ProviderConfig,
        ctx: ProviderContext,
    ) -> Result<Box<dyn ProviderPublishing>, ProviderError> {
        config.validate()?;
        Ok((self.build)(config, ctx))
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("id", &self.id)
            .field("endpoints", &self.endpoints)
            .field("polling", &self.polling)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// Well-known URLs of a platform.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints {
    /// Page the user is sent to for consent.
    pub authorize_url: &'static str,
    /// Default API base URL.
    pub api_base: &'static str,
    /// Canonical URL of published content; `{id}` and `{username}` are
    /// substituted.
    pub release_url_template: &'static str,
}

impl Endpoints {
    /// Builds the canonical URL of a published post.
    pub fn release_url(&self, id: &str, username: &str) -> String {
        self.release_url_template
            .replace("{username}", username)
            .replace("{id}", id)
    }
}

// ============================================================================
// Polling Plan
// ============================================================================

/// Poll policies of a platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct PollingPlan {
    /// Media processing after an upload, if the platform has one.
    pub media: Option<PollPolicy>,
    /// Publish job status, if publishing is asynchronous.
    pub publish: Option<PollPolicy>,
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ProviderDescriptor`].
pub struct ProviderDescriptorBuilder {
    id: ProviderKind,
    metadata: Option<ProviderMetadata>,
    endpoints: Option<Endpoints>,
    polling: PollingPlan,
    build: Option<BuildFn>,
}

impl ProviderDescriptorBuilder {
    /// Creates a new builder for the given provider.
    pub fn new(id: ProviderKind) -> Self {
        Self {
            id,
            metadata: None,
            endpoints: None,
            polling: PollingPlan::default(),
            build: None,
        }
    }

    /// Sets the metadata.
    pub fn metadata(mut self, metadata: ProviderMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the endpoints.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Sets the polling plan.
    pub fn polling(mut self, polling: PollingPlan) -> Self {
        self.polling = polling;
        self
    }

    /// Sets the constructor.
    pub fn build_with(mut self, build: BuildFn) -> Self {
        self.build = Some(build);
        self
    }

    /// Builds the descriptor.
    ///
    /// Fails if endpoints or the constructor are missing.
    pub fn build(self) -> Result<ProviderDescriptor, ProviderError> {
        let id = self.id;
        let missing =
            |what: &str| ProviderError::Config(format!("descriptor for {id} has no {what}"));
        let endpoints = self.endpoints.ok_or_else(|| missing("endpoints"))?;
        let build = self.build.ok_or_else(|| missing("constructor"))?;

        Ok(ProviderDescriptor {
            id,
            metadata: self
                .metadata
                .unwrap_or_else(|| ProviderMetadata::for_provider(id)),
            endpoints,
            polling: self.polling,
            build,
        })
    }
}
