//! Publish results and publishing targets.

use serde::{Deserialize, Serialize};

/// Terminal outcome of a publish call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    /// Post is live (or delivered to the user's inbox for review).
    Success,
    /// Post was not created.
    Failure,
}

/// Normalized result of publishing one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    /// Caller's post id.
    pub post_description_id: String,
    /// Id of the created object on the platform.
    pub platform_post_id: String,
    /// Canonical URL of the published content.
    pub release_url: String,
    /// Outcome.
    pub status: PublishStatus,
}

impl PublishResult {
    /// Creates a successful result.
    pub fn success(
        post_description_id: impl Into<String>,
        platform_post_id: impl Into<String>,
        release_url: impl Into<String>,
    ) -> Self {
        Self {
            post_description_id: post_description_id.into(),
            platform_post_id: platform_post_id.into(),
            release_url: release_url.into(),
            status: PublishStatus::Success,
        }
    }

    /// Returns true if the post was created.
    pub fn is_success(&self) -> bool {
        self.status == PublishStatus::Success
    }
}

/// A board, channel or other container posts can be published into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Platform id.
    pub id: String,
    /// Display name.
    pub name: String,
}
