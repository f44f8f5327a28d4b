//! Cancellable, deadline-aware status polling.
//!
//! Every asynchronous platform job (media processing, publish jobs) is
//! awaited through [`poll_until`]. The loop is strictly sequential: one
//! status check at a time, then one sleep. Cancellation and the deadline are
//! checked before every sleep, and the sleep itself races the cancellation
//! token.

use std::future::Future;
use std::time::Duration;

use postmill_core::{JobControl, ProcessingFailure, ProviderError};
use tracing::{debug, warn};

use crate::clock::Clock;

// ============================================================================
// Policy
// ============================================================================

/// Timing and budget of one poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before the first status check.
    pub initial_delay: Duration,
    /// Delay between two status checks.
    pub interval: Duration,
    /// Maximum number of status checks; `None` relies on the deadline alone.
    pub max_attempts: Option<u32>,
}

impl PollPolicy {
    /// Polls every `interval` with no warm-up and no attempt cap.
    pub const fn every(interval: Duration) -> Self {
        Self {
            initial_delay: Duration::ZERO,
            interval,
            max_attempts: None,
        }
    }

    /// Sets the warm-up delay.
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Caps the number of status checks.
    pub const fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = Some(max);
        self
    }
}

// ============================================================================
// Poll Step
// ============================================================================

/// Outcome of one status check.
#[derive(Debug, Clone, PartialEq)]
pub enum PollStep<T> {
    /// Terminal success.
    Done(T),
    /// Terminal failure reported by the platform.
    Failed {
        /// Status string the platform reported.
        status: String,
        /// Raw response body.
        body: String,
    },
    /// Not terminal yet.
    Pending {
        /// Status string the platform reported.
        status: String,
        /// Raw response body.
        body: String,
    },
}

// ============================================================================
// Poll Loop
// ============================================================================

struct LastSeen<'a> {
    reference: &'a str,
    status: String,
    body: String,
    attempts: u32,
}

impl LastSeen<'_> {
    fn fail(self, reason: ProcessingFailure) -> ProviderError {
        ProviderError::MediaProcessing {
            reference: self.reference.to_string(),
            reason,
            last_status: self.status,
            body: self.body,
            attempts: self.attempts,
        }
    }
}

/// Checks cancellation and the deadline, then sleeps for `delay`.
///
/// Refuses to start a sleep that would end past the deadline.
async fn pause(
    clock: &dyn Clock,
    control: &JobControl,
    delay: Duration,
) -> Result<(), ProcessingFailure> {
    if control.is_cancelled() {
        return Err(ProcessingFailure::Cancelled);
    }

    if let Some(deadline) = control.deadline() {
        let wake = chrono::Duration::from_std(delay)
            .ok()
            .and_then(|d| clock.now().checked_add_signed(d));
        if wake.is_none_or(|w| w > deadline) {
            return Err(ProcessingFailure::DeadlineExceeded);
        }
    }

    tokio::select! {
        () = control.token().cancelled() => Err(ProcessingFailure::Cancelled),
        () = clock.sleep(delay) => Ok(()),
    }
}

/// Polls `check` until it reports a terminal step.
///
/// `check` receives the 1-based attempt number. Errors it returns (transport
/// failures, expired credentials) abort the loop unchanged. Every other way
/// the loop can stop without success is a [`ProviderError::MediaProcessing`]
/// carrying `reference`, the last observed status and body, and the number
/// of checks performed.
pub async fn poll_until<T, F, Fut>(
    policy: &PollPolicy,
    clock: &dyn Clock,
    control: &JobControl,
    reference: &str,
    mut check: F,
) -> Result<T, ProviderError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<PollStep<T>, ProviderError>>,
{
    let mut last = LastSeen {
        reference,
        status: String::new(),
        body: String::new(),
        attempts: 0,
    };

    if !policy.initial_delay.is_zero() {
        if let Err(reason) = pause(clock, control, policy.initial_delay).await {
            return Err(last.fail(reason));
        }
    }

    loop {
        last.attempts += 1;
        match check(last.attempts).await? {
            PollStep::Done(value) => {
                debug!(reference, attempts = last.attempts, "Polling finished");
                return Ok(value);
            }
            PollStep::Failed { status, body } => {
                warn!(reference, %status, "Platform reported processing failure");
                last.status = status;
                last.body = body;
                return Err(last.fail(ProcessingFailure::ReportedFailure));
            }
            PollStep::Pending { status, body } => {
                debug!(reference, attempt = last.attempts, %status, "Still processing");
                last.status = status;
                last.body = body;
            }
        }

        if policy.max_attempts.is_some_and(|max| last.attempts >= max) {
            warn!(reference, attempts = last.attempts, "Poll budget exhausted");
            return Err(last.fail(ProcessingFailure::AttemptsExhausted));
        }

        if let Err(reason) = pause(clock, control, policy.interval).await {
            warn!(reference, %reason, "Polling stopped");
            return Err(last.fail(reason));
        }
    }
}
