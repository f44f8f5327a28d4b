//! Pinterest provider implementation.
//!
//! Pinterest publishes synchronously: `POST /v5/pins` returns the pin.
//! Videos are uploaded first and polled until processed.

mod analytics;
mod api;
mod descriptor;
mod error;
mod oauth;
mod payload;
mod provider;
mod upload;

pub use descriptor::pinterest_descriptor;
pub use error::{MISSING_COVER_HINT, PinterestInspector};
pub use payload::PinterestSettings;
pub use provider::PinterestProvider;
