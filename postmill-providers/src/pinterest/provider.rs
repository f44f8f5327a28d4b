//! Pinterest implementation of [`ProviderPublishing`].

use async_trait::async_trait;
use postmill_core::{
    AnalyticsSeries, AuthorizationRequest, Board, Credentials, JobControl, PostDescription,
    ProviderConfig, ProviderError, ProviderKind, ProviderMetadata, ProviderPublishing,
    PublishResult,
};
use postmill_transport::{PollPolicy, ProviderContext};
use tracing::{info, instrument};

use super::api::{CreatedPin, PINS_PATH};
use super::descriptor::{API_BASE, ENDPOINTS, MEDIA_POLL};
use super::payload::{MediaSource, PinterestSettings, pin_payload};
use crate::response::decode;

/// Pinterest provider.
///
/// Holds configuration and collaborators only; tokens are passed per call.
pub struct PinterestProvider {
    pub(crate) config: ProviderConfig,
    pub(crate) ctx: ProviderContext,
    pub(crate) api_base: String,
    pub(crate) scopes: Vec<String>,
    pub(crate) media_poll: PollPolicy,
    metadata: ProviderMetadata,
    max_jobs: usize,
}

impl PinterestProvider {
    /// Creates a provider from explicit configuration.
    pub fn new(config: ProviderConfig, ctx: ProviderContext) -> Self {
        let metadata = ProviderMetadata::for_provider(ProviderKind::Pinterest);
        Self {
            api_base: config.api_base(API_BASE).to_string(),
            scopes: config.effective_scopes(&metadata),
            max_jobs: config.effective_max_concurrent_jobs(&metadata),
            media_poll: MEDIA_POLL,
            metadata,
            config,
            ctx,
        }
    }

    /// Overrides the media processing poll policy.
    pub fn with_media_poll(mut self, policy: PollPolicy) -> Self {
        self.media_poll = policy;
        self
    }

    #[instrument(skip_all, fields(post = %post.id))]
    async fn publish_pin(
        &self,
        post: &PostDescription,
        credentials: &Credentials,
        control: &JobControl,
    ) -> Result<PublishResult, ProviderError> {
        let token = credentials.access_token.as_str();
        let plan = post.media_plan()?;
        let settings: PinterestSettings = post.settings_as()?;
        settings.board_id()?;

        let media_id = match plan.video {
            Some(video) => Some(self.upload_video(token, video, control).await?),
            None => None,
        };

        let source = MediaSource::choose(&plan, media_id.as_deref())?;
        let payload = pin_payload(&post.message, &settings, &source)?;

        let response = self.post_json(PINS_PATH, token, payload).await?;
        let created: CreatedPin = decode(&response)?;
        let Some(pin_id) = created.id.filter(|id| !id.is_empty()) else {
            return Err(ProviderError::UnclassifiedProvider {
                status: response.status,
                body: response.text().into_owned(),
            });
        };

        info!(pin_id = %pin_id, "Pin created");
        let release_url = ENDPOINTS.release_url(&pin_id, &credentials.username);
        Ok(PublishResult::success(&post.id, pin_id, release_url))
    }
}

#[async_trait]
impl ProviderPublishing for PinterestProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Pinterest
    }

    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn required_scopes(&self) -> &[String] {
        &self.scopes
    }

    fn max_concurrent_jobs(&self) -> usize {
        self.max_jobs
    }

    async fn build_authorization_request(&self) -> Result<AuthorizationRequest, ProviderError> {
        self.authorization_request()
    }

    async fn exchange_code(
        &self,
        code: &str,
        _code_verifier: &str,
    ) -> Result<Credentials, ProviderError> {
        self.exchange(code).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, ProviderError> {
        self.refresh_credentials(refresh_token).await
    }

    async fn list_boards(&self, access_token: &str) -> Result<Vec<Board>, ProviderError> {
        self.boards(access_token).await
    }

    async fn publish(
        &self,
        post: &PostDescription,
        credentials: &Credentials,
        control: &JobControl,
    ) -> Result<PublishResult, ProviderError> {
        self.publish_pin(post, credentials, control).await
    }

    async fn fetch_analytics(
        &self,
        access_token: &str,
        lookback_days: u32,
    ) -> Result<Vec<AnalyticsSeries>, ProviderError> {
        self.analytics(access_token, lookback_days).await
    }
}
