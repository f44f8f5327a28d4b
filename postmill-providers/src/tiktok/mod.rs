//! TikTok provider implementation.
//!
//! Posts are pulled by TikTok from their public URL; the init call returns
//! a `publish_id` that is polled until the post is live.

mod api;
mod descriptor;
mod error;
mod oauth;
mod payload;
mod provider;

pub use api::CreatorInfo;
pub use descriptor::tiktok_descriptor;
pub use error::TikTokInspector;
pub use payload::{PostingMethod, TikTokSettings};
pub use provider::TikTokProvider;
