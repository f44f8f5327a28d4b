//! TikTok API v2 requests and response types.

use postmill_core::ProviderError;
use postmill_transport::{HttpRequest, HttpResponse, ensure_success};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::error::TikTokInspector;
use super::provider::TikTokProvider;
use crate::response::decode;

// ============================================================================
// Constants
// ============================================================================

pub(crate) const TOKEN_PATH: &str = "/v2/oauth/token/";
pub(crate) const USER_INFO_PATH: &str =
    "/v2/user/info/?fields=open_id,avatar_url,display_name,union_id,username";
pub(crate) const CREATOR_INFO_PATH: &str = "/v2/post/publish/creator_info/query/";
pub(crate) const PUBLISH_PATH: &str = "/v2/post/publish";
pub(crate) const STATUS_PATH: &str = "/v2/post/publish/status/fetch/";

// ============================================================================
// Response Types
// ============================================================================

/// The `data` member of TikTok's envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserInfoData {
    pub user: UserInfo,
}

/// `GET /v2/user/info/`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserInfo {
    pub open_id: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub username: String,
}

/// What the creator may post right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorInfo {
    /// Creator handle.
    #[serde(default)]
    pub creator_username: String,
    /// Creator display name.
    #[serde(default)]
    pub creator_nickname: String,
    /// Longest video the creator may post, in seconds.
    #[serde(default)]
    pub max_video_post_duration_sec: Option<u64>,
    /// Privacy levels the creator may choose from.
    #[serde(default)]
    pub privacy_level_options: Vec<String>,
}

/// `POST /v2/post/publish/.../init/`.
#[derive(Debug, Deserialize)]
pub(crate) struct PublishInit {
    pub publish_id: String,
}

/// `POST /v2/post/publish/status/fetch/`.
#[derive(Debug, Deserialize)]
pub(crate) struct PublishStatusData {
    #[serde(default)]
    pub status: String,
    // Sic: TikTok's field name.
    #[serde(default)]
    pub publicaly_available_post_id: Vec<Value>,
}

impl PublishStatusData {
    /// First public post id; TikTok reports them as numbers.
    pub fn public_post_id(&self) -> Option<String> {
        self.publicaly_available_post_id
            .first()
            .and_then(|id| match id {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|id| !id.is_empty())
    }
}

// ============================================================================
// Requests
// ============================================================================

impl TikTokProvider {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// Sends a request and classifies the answer.
    pub(crate) async fn call(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError> {
        let response = self.ctx.transport.send(request).await?;
        ensure_success(response, &TikTokInspector)
    }

    /// Bearer JSON POST against the API.
    pub(crate) async fn post_json(
        &self,
        path: &str,
        token: &str,
        body: Value,
    ) -> Result<HttpResponse, ProviderError> {
        self.call(HttpRequest::post(self.url(path)).bearer(token).json(body))
            .await
    }

    #[instrument(skip(self, token))]
    pub(crate) async fn user_info(&self, token: &str) -> Result<UserInfo, ProviderError> {
        let response = self
            .call(HttpRequest::get(self.url(USER_INFO_PATH)).bearer(token))
            .await?;
        let envelope: Envelope<UserInfoData> = decode(&response)?;
        Ok(envelope.data.user)
    }

    /// Queries what the creator may post (duration limit, privacy levels).
    #[instrument(skip(self, token))]
    pub async fn creator_info(&self, token: &str) -> Result<CreatorInfo, ProviderError> {
        let response = self
            .call(HttpRequest::post(self.url(CREATOR_INFO_PATH)).bearer(token))
            .await?;
        let envelope: Envelope<CreatorInfo> = decode(&response)?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_public_post_id_from_number() {
        let data: PublishStatusData = serde_json::from_value(json!({
            "status": "PUBLISH_COMPLETE",
            "publicaly_available_post_id": [7_345_678_901_234_567_890_u64]
        }))
        .unwrap();
        assert_eq!(data.public_post_id().as_deref(), Some("7345678901234567890"));
    }

    #[test]
    fn test_public_post_id_absent() {
        let data: PublishStatusData =
            serde_json::from_value(json!({"status": "PROCESSING_DOWNLOAD"})).unwrap();
        assert!(data.public_post_id().is_none());
    }
}
