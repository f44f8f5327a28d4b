//! Per-job deadline and cancellation.

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

/// Deadline and cancellation signal for one publish or upload job.
///
/// Poll loops check this before every sleep, so an orchestration layer can
/// abort a stuck job.
#[derive(Debug, Clone, Default)]
pub struct JobControl {
    deadline: Option<DateTime<Utc>>,
    cancel: CancellationToken,
}

impl JobControl {
    /// Creates a control with no deadline and a fresh cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an absolute deadline.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Uses an existing cancellation token (e.g. a child of a scheduler token).
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the earlier of the own deadline and `fallback`.
    pub fn deadline_or(&self, fallback: DateTime<Utc>) -> DateTime<Utc> {
        self.deadline.map_or(fallback, |d| d.min(fallback))
    }

    /// The cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns true once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_deadline_or_takes_earlier() {
        let now = Utc::now();
        let control = JobControl::new().with_deadline(now + Duration::seconds(5));
        assert_eq!(control.deadline_or(now + Duration::seconds(60)), now + Duration::seconds(5));
        assert_eq!(control.deadline_or(now + Duration::seconds(1)), now + Duration::seconds(1));
        assert_eq!(JobControl::new().deadline_or(now), now);
    }

    #[test]
    fn test_clones_share_cancellation() {
        let control = JobControl::new();
        let other = control.clone();
        other.cancel();
        assert!(control.is_cancelled());
    }
}
