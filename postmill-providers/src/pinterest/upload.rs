//! Pinterest video upload pipeline.
//!
//! ```text
//! POST /v5/media            → media_id, upload_url, upload_parameters
//! GET  {source}             → video bytes
//! POST {upload_url}         → multipart: parameters, then `file`
//! GET  /v5/media/{media_id} → polled until succeeded / failed
//! ```

use postmill_core::{JobControl, MediaRef, MediaStatus, MediaUploadState, ProviderError};
use postmill_transport::{HttpRequest, MultipartPart, PollStep, StatusOnly, ensure_success, poll_until};
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument, warn};

use super::api::{MEDIA_PATH, MediaStatusBody, UploadSlot};
use super::provider::PinterestProvider;
use crate::response::decode;

const SUCCEEDED: &str = "succeeded";
const FAILED: &str = "failed";

/// File name used when the source URL has no usable last segment.
const FALLBACK_FILE_NAME: &str = "video.mp4";

fn file_name(path: &str) -> String {
    path.split(['?', '#'])
        .next()
        .and_then(|p| p.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

/// Multipart parts: every upload parameter in order, then the file.
fn upload_parts(parameters: &Map<String, Value>, video: &MediaRef, bytes: Vec<u8>) -> Vec<MultipartPart> {
    let mut parts: Vec<MultipartPart> = parameters
        .iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| MultipartPart::Text {
            name: name.clone(),
            value: match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })
        .collect();

    parts.push(MultipartPart::File {
        name: "file".to_string(),
        file_name: file_name(&video.path),
        content_type: video.mime_hint.clone(),
        bytes,
    });
    parts
}

impl PinterestProvider {
    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self.ctx.transport.send(HttpRequest::get(url).unbounded()).await?;
        if !response.is_success() {
            return Err(ProviderError::MalformedRequest {
                hint: format!("Could not download media from {url}"),
                status: Some(response.status),
                body: Some(response.text().into_owned()),
            });
        }
        debug!(len = response.body.len(), "Source media downloaded");
        Ok(response.body)
    }

    async fn media_status(&self, token: &str, media_id: &str) -> Result<PollStep<()>, ProviderError> {
        let response = self.get(&format!("{MEDIA_PATH}/{media_id}"), token).await?;
        let body = response.text().into_owned();
        let status = decode::<MediaStatusBody>(&response)?.status;

        Ok(if status == SUCCEEDED {
            PollStep::Done(())
        } else if status == FAILED {
            PollStep::Failed { status, body }
        } else {
            PollStep::Pending { status, body }
        })
    }

    /// Uploads one video and waits for Pinterest to process it.
    ///
    /// Returns the media id to reference in the pin.
    #[instrument(skip(self, token, video, control), fields(source = %video.path))]
    pub(crate) async fn upload_video(
        &self,
        token: &str,
        video: &MediaRef,
        control: &JobControl,
    ) -> Result<String, ProviderError> {
        let mut state = MediaUploadState::new();

        let slot: UploadSlot =
            decode(&self.post_json(MEDIA_PATH, token, json!({ "media_type": "video" })).await?)?;
        info!(media_id = %slot.media_id, "Upload slot granted");
        state.media_id = Some(slot.media_id.clone());
        state.advance(MediaStatus::Uploading)?;

        let bytes = self.download(&video.path).await?;
        let parts = upload_parts(&slot.upload_parameters, video, bytes);
        let response = self
            .ctx
            .transport
            .send(HttpRequest::post(&slot.upload_url).multipart(parts).unbounded())
            .await?;
        ensure_success(response, &StatusOnly)?;
        state.advance(MediaStatus::Processing)?;

        let media_id = slot.media_id.as_str();
        let outcome = poll_until(
            &self.media_poll,
            self.ctx.clock.as_ref(),
            control,
            media_id,
            |_| {
                state.record_attempt();
                self.media_status(token, media_id)
            },
        )
        .await;

        match outcome {
            Ok(()) => {
                state.advance(MediaStatus::Succeeded)?;
                info!(media_id, attempts = state.attempts_made, "Video processed");
                Ok(slot.media_id)
            }
            Err(err) => {
                state.advance(MediaStatus::Failed)?;
                warn!(media_id, error = %err, "Video processing did not succeed");
                Err(err)
            }
        }
    }
}
