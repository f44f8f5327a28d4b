// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # postmill Transport
//!
//! Everything a provider needs from its host, behind seams that tests can
//! replace.
//!
//! ## Collaborators
//!
//! - [`http::Transport`] - GET/POST/HEAD with form, JSON or multipart bodies
//! - [`clock::Clock`] - Current time and sleeps
//! - [`ids::IdSource`] - Unguessable `state` and code verifier values
//! - [`context::ProviderContext`] - Bundles the three for a provider
//!
//! ## Shared Logic
//!
//! - [`classify::classify`] - Turns a status and raw body into a
//!   [`postmill_core::ProviderError`], with a per-platform body hook
//! - [`poll::poll_until`] - Cancellable, deadline-aware status polling
//!
//! ## Example
//!
//! ```ignore
//! use postmill_transport::{PollPolicy, ProviderContext, poll_until};
//!
//! let ctx = ProviderContext::live()?;
//! let policy = PollPolicy::every(Duration::from_secs(30)).with_max_attempts(10);
//! let media = poll_until(&policy, ctx.clock.as_ref(), &control, &media_id, |_| check()).await?;
//! ```

pub mod classify;
pub mod clock;
pub mod context;
pub mod error;
pub mod http;
pub mod ids;
pub mod mock;
pub mod poll;

// Errors
pub use error::TransportError;

// Collaborators
pub use clock::{Clock, SystemClock};
pub use context::{ProviderContext, ProviderContextBuilder};
pub use http::{
    HttpClient, HttpRequest, HttpResponse, Method, MultipartPart, RequestBody, RequestTimeout,
    Transport,
};
pub use ids::{IdSource, SecureIdSource};

// Shared logic
pub use classify::{BodySignal, ResponseInspector, StatusOnly, classify, ensure_success};
pub use poll::{PollPolicy, PollStep, poll_until};
