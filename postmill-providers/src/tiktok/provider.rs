//! TikTok implementation of [`ProviderPublishing`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use postmill_core::{
    AnalyticsSeries, AuthorizationRequest, Board, Credentials, JobControl, PostDescription,
    ProviderConfig, ProviderError, ProviderKind, ProviderMetadata, ProviderPublishing,
    PublishResult,
};
use postmill_transport::{HttpRequest, PollPolicy, PollStep, ProviderContext, poll_until};
use serde_json::json;
use tracing::{debug, info, instrument};

use super::api::{Envelope, PublishInit, PublishStatusData, STATUS_PATH};
use super::descriptor::{API_BASE, ENDPOINTS, PROFILE_URL, PUBLISH_POLL};
use super::payload::{PostingMethod, TikTokMedia, TikTokSettings, publish_request};
use crate::response::decode;

const PUBLISH_COMPLETE: &str = "PUBLISH_COMPLETE";
const SEND_TO_USER_INBOX: &str = "SEND_TO_USER_INBOX";
const FAILED: &str = "FAILED";

fn is_complete(status: &str, method: PostingMethod) -> bool {
    status == PUBLISH_COMPLETE || (method == PostingMethod::Upload && status == SEND_TO_USER_INBOX)
}

/// TikTok provider.
///
/// Publishing is asynchronous: the init call returns a `publish_id` whose
/// status is polled until TikTok reports completion or failure.
pub struct TikTokProvider {
    pub(crate) config: ProviderConfig,
    pub(crate) ctx: ProviderContext,
    pub(crate) api_base: String,
    pub(crate) scopes: Vec<String>,
    publish_poll: PollPolicy,
    metadata: ProviderMetadata,
    max_jobs: usize,
}

impl TikTokProvider {
    /// Creates a provider from explicit configuration.
    pub fn new(config: ProviderConfig, ctx: ProviderContext) -> Self {
        let metadata = ProviderMetadata::for_provider(ProviderKind::TikTok);
        Self {
            api_base: config.api_base(API_BASE).to_string(),
            scopes: config.effective_scopes(&metadata),
            max_jobs: config.effective_max_concurrent_jobs(&metadata),
            publish_poll: PUBLISH_POLL,
            metadata,
            config,
            ctx,
        }
    }

    /// Overrides the publish status poll policy.
    pub fn with_publish_poll(mut self, policy: PollPolicy) -> Self {
        self.publish_poll = policy;
        self
    }

    /// Deadline for one job: the caller's, capped by the configured timeout.
    fn job_deadline(&self, control: &JobControl) -> DateTime<Utc> {
        let now = self.ctx.clock.now();
        let fallback = chrono::Duration::from_std(self.config.publish_timeout())
            .ok()
            .and_then(|timeout| now.checked_add_signed(timeout))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        control.deadline_or(fallback)
    }

    /// Checks that TikTok will be able to pull the video.
    #[instrument(skip(self))]
    async fn probe_video(&self, url: &str) -> Result<(), ProviderError> {
        let response = self.ctx.transport.send(HttpRequest::head(url)).await?;
        if response.is_success() {
            debug!(status = response.status, "Video URL reachable");
            return Ok(());
        }
        Err(ProviderError::MalformedRequest {
            hint: format!("Video URL is not accessible: {}", response.status),
            status: Some(response.status),
            body: Some(response.text().into_owned()),
        })
    }

    async fn publish_status(
        &self,
        token: &str,
        publish_id: &str,
        method: PostingMethod,
    ) -> Result<PollStep<Option<String>>, ProviderError> {
        let response = self
            .post_json(STATUS_PATH, token, json!({ "publish_id": publish_id }))
            .await?;
        let body = response.text().into_owned();
        let data = decode::<Envelope<PublishStatusData>>(&response)?.data;

        Ok(if is_complete(&data.status, method) {
            PollStep::Done(data.public_post_id())
        } else if data.status == FAILED {
            PollStep::Failed {
                status: data.status,
                body,
            }
        } else {
            PollStep::Pending {
                status: data.status,
                body,
            }
        })
    }

    #[instrument(skip_all, fields(post = %post.id))]
    async fn publish_post(
        &self,
        post: &PostDescription,
        credentials: &Credentials,
        control: &JobControl,
    ) -> Result<PublishResult, ProviderError> {
        let token = credentials.access_token.as_str();
        let plan = post.media_plan()?;
        let settings: TikTokSettings = post.settings_as()?;
        let media = TikTokMedia::from_plan(&plan)?;

        if let TikTokMedia::Video(video) = &media {
            self.probe_video(&video.path).await?;
        }

        let request = publish_request(&post.message, &settings, &media);
        let response = self.post_json(&request.path, token, request.body).await?;
        let publish_id = decode::<Envelope<PublishInit>>(&response)?.data.publish_id;
        info!(%publish_id, "Publish job started");

        let method = settings.content_posting_method;
        let job = control.clone().with_deadline(self.job_deadline(control));
        let public_id = poll_until(
            &self.publish_poll,
            self.ctx.clock.as_ref(),
            &job,
            &publish_id,
            |_| self.publish_status(token, &publish_id, method),
        )
        .await?;

        let username = credentials.username.as_str();
        let result = match public_id {
            Some(id) => {
                let url = ENDPOINTS.release_url(&id, username);
                PublishResult::success(&post.id, id, url)
            }
            None => PublishResult::success(
                &post.id,
                publish_id.as_str(),
                PROFILE_URL.replace("{username}", username),
            ),
        };
        info!(platform_post_id = %result.platform_post_id, "TikTok post published");
        Ok(result)
    }
}

#[async_trait]
impl ProviderPublishing for TikTokProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::TikTok
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
        code_verifier: &str,
    ) -> Result<Credentials, ProviderError> {
        self.exchange(code, code_verifier).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, ProviderError> {
        self.refresh_credentials(refresh_token).await
    }

    /// TikTok has no boards.
    async fn list_boards(&self, _access_token: &str) -> Result<Vec<Board>, ProviderError> {
        Ok(Vec::new())
    }

    async fn publish(
        &self,
        post: &PostDescription,
        credentials: &Credentials,
        control: &JobControl,
    ) -> Result<PublishResult, ProviderError> {
        self.publish_post(post, credentials, control).await
    }

    async fn fetch_analytics(
        &self,
        _access_token: &str,
        _lookback_days: u32,
    ) -> Result<Vec<AnalyticsSeries>, ProviderError> {
        Err(ProviderError::Unsupported {
            provider: ProviderKind::TikTok.identifier(),
            operation: "fetch_analytics",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_tokens_per_method() {
        assert!(is_complete(PUBLISH_COMPLETE, PostingMethod::DirectPost));
        assert!(is_complete(SEND_TO_USER_INBOX, PostingMethod::Upload));
        assert!(!is_complete(SEND_TO_USER_INBOX, PostingMethod::DirectPost));
        assert!(!is_complete("PROCESSING_DOWNLOAD", PostingMethod::Upload));
    }
}
