//! Media upload state machine.
//!
//! One [`MediaUploadState`] exists per video item while it is uploaded and
//! processed:
//!
//! ```text
//! created → uploading → processing → succeeded
//!                                  ↘ failed
//! ```
//!
//! No step can be skipped and nothing leaves a terminal state.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Media Status
// ============================================================================

/// Lifecycle status of an uploaded media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    /// Upload slot not yet requested.
    Created,
    /// Bytes are being sent to the platform.
    Uploading,
    /// Platform is transcoding; status is being polled.
    Processing,
    /// Platform reported success; the media id is usable.
    Succeeded,
    /// Platform reported failure or the poll budget ran out.
    Failed,
}

impl MediaStatus {
    /// Returns true for `Succeeded` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Returns true if `self → next` is a legal transition.
    pub fn can_transition_to(self, next: MediaStatus) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::Uploading)
                | (Self::Uploading, Self::Processing)
                | (Self::Processing, Self::Succeeded | Self::Failed)
        )
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Uploading => "uploading",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Illegal state machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid media transition {from} → {to}")]
pub struct InvalidTransition {
    /// Current status.
    pub from: MediaStatus,
    /// Requested status.
    pub to: MediaStatus,
}

// ============================================================================
// Media Upload State
// ============================================================================

/// Transient state of one media upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUploadState {
    /// Platform media id, known once the upload slot is granted.
    pub media_id: Option<String>,
    /// Current status.
    pub status: MediaStatus,
    /// Status checks performed so far.
    pub attempts_made: u32,
}

impl MediaUploadState {
    /// Creates a state in `Created`.
    pub fn new() -> Self {
        Self {
            media_id: None,
            status: MediaStatus::Created,
            attempts_made: 0,
        }
    }

    /// Moves to `next`, rejecting skipped or backward transitions.
    pub fn advance(&mut self, next: MediaStatus) -> Result<(), InvalidTransition> {
        if !self.status.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Records one status check.
    pub fn record_attempt(&mut self) {
        self.attempts_made += 1;
    }

    /// Returns true once the upload reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Default for MediaUploadState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MediaStatus; 5] = [
        MediaStatus::Created,
        MediaStatus::Uploading,
        MediaStatus::Processing,
        MediaStatus::Succeeded,
        MediaStatus::Failed,
    ];

    #[test]
    fn test_happy_path() {
        let mut state = MediaUploadState::new();
        state.advance(MediaStatus::Uploading).unwrap();
        state.advance(MediaStatus::Processing).unwrap();
        state.advance(MediaStatus::Succeeded).unwrap();
        assert!(state.is_terminal());
    }

    #[test]
    fn test_cannot_skip_upload() {
        let mut state = MediaUploadState::new();
        let err = state.advance(MediaStatus::Processing).unwrap_err();
        assert_eq!(err.from, MediaStatus::Created);
        assert_eq!(state.status, MediaStatus::Created);
    }

    #[test]
    fn test_terminal_states_are_sinks() {
        for terminal in [MediaStatus::Succeeded, MediaStatus::Failed] {
            for next in ALL {
                assert!(!terminal.can_transition_to(next), "{terminal} → {next}");
            }
        }
    }

    #[test]
    fn test_no_return_to_processing() {
        for from in ALL {
            let allowed = from.can_transition_to(MediaStatus::Processing);
            assert_eq!(allowed, from == MediaStatus::Uploading);
        }
    }
}
