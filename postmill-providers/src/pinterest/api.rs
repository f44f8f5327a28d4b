//! Pinterest API v5 requests and response types.

use postmill_core::{Board, DailyMetrics, ProviderError};
use postmill_transport::{HttpRequest, HttpResponse, ensure_success};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::error::PinterestInspector;
use super::provider::PinterestProvider;
use crate::response::decode;

// ============================================================================
// Constants
// ============================================================================

pub(crate) const TOKEN_PATH: &str = "/v5/oauth/token";
pub(crate) const USER_ACCOUNT_PATH: &str = "/v5/user_account";
pub(crate) const BOARDS_PATH: &str = "/v5/boards";
pub(crate) const MEDIA_PATH: &str = "/v5/media";
pub(crate) const PINS_PATH: &str = "/v5/pins";
pub(crate) const ANALYTICS_PATH: &str = "/v5/user_account/analytics";

/// Boards requested per page (Pinterest's maximum).
const BOARDS_PAGE_SIZE: u32 = 100;

/// Upper bound on followed bookmarks.
const MAX_BOARD_PAGES: usize = 50;

// ============================================================================
// Response Types
// ============================================================================

/// `GET /v5/user_account`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserAccount {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BoardItem {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct BoardsPage {
    #[serde(default)]
    items: Vec<BoardItem>,
    #[serde(default)]
    bookmark: Option<String>,
}

/// `POST /v5/media`.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadSlot {
    pub media_id: String,
    pub upload_url: String,
    #[serde(default)]
    pub upload_parameters: Map<String, Value>,
}

/// `GET /v5/media/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct MediaStatusBody {
    #[serde(default)]
    pub status: String,
}

/// `POST /v5/pins`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedPin {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyticsAll {
    #[serde(default)]
    daily_metrics: Vec<DailyMetrics>,
}

/// `GET /v5/user_account/analytics`.
#[derive(Debug, Deserialize)]
pub(crate) struct AnalyticsReport {
    all: AnalyticsAll,
}

impl AnalyticsReport {
    pub fn into_days(self) -> Vec<DailyMetrics> {
        self.all.daily_metrics
    }
}

// ============================================================================
// Requests
// ============================================================================

impl PinterestProvider {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// Sends a request and classifies the answer.
    pub(crate) async fn call(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError> {
        let response = self.ctx.transport.send(request).await?;
        ensure_success(response, &PinterestInspector)
    }

    /// Bearer GET against the API.
    pub(crate) async fn get(&self, path: &str, token: &str) -> Result<HttpResponse, ProviderError> {
        self.call(HttpRequest::get(self.url(path)).bearer(token)).await
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
    pub(crate) async fn user_account(&self, token: &str) -> Result<UserAccount, ProviderError> {
        decode(&self.get(USER_ACCOUNT_PATH, token).await?)
    }

    /// Lists every board, following `bookmark` pagination.
    #[instrument(skip(self, token))]
    pub(crate) async fn boards(&self, token: &str) -> Result<Vec<Board>, ProviderError> {
        let mut boards = Vec::new();
        let mut bookmark: Option<String> = None;

        for page in 0..MAX_BOARD_PAGES {
            let mut path = format!("{BOARDS_PATH}?page_size={BOARDS_PAGE_SIZE}");
            if let Some(b) = &bookmark {
                path.push_str("&bookmark=");
                path.push_str(&url::form_urlencoded::byte_serialize(b.as_bytes()).collect::<String>());
            }

            let body: BoardsPage = decode(&self.get(&path, token).await?)?;
            debug!(page, count = body.items.len(), "Boards page received");
            boards.extend(body.items.into_iter().map(|b| Board { id: b.id, name: b.name }));

            match body.bookmark.filter(|b| !b.is_empty()) {
                Some(next) => bookmark = Some(next),
                None => return Ok(boards),
            }
        }

        debug!(pages = MAX_BOARD_PAGES, "Stopped following board bookmarks");
        Ok(boards)
    }
}
