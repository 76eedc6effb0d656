use crate::recording::StopRequest;

use std::time::Duration;

use tokio::{sync::mpsc, time::Instant};
use uuid::Uuid;

/// Recording session slot. `Recording` doubles as the session lock.
#[derive(Debug)]
pub(crate) enum RecordingState {
    /// No session active.
    Idle,
    /// A session driver is running.
    Recording {
        /// Unique session ID for log correlation.
        session_id: Uuid,
        /// When the session was accepted.
        started_at: Instant,
        /// Segments delivered so far.
        segments_done: u32,
        /// Channel to the session driver.
        stop_tx: mpsc::Sender<StopRequest>,
    },
}

impl RecordingState {
    /// Whether this slot belongs to `session_id`.
    pub(crate) fn is_session(&self, id: Uuid) -> bool {
        matches!(self, RecordingState::Recording { session_id, .. } if *session_id == id)
    }
}

/// Snapshot of the recording session for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingStatus {
    /// Not currently recording.
    Idle,
    /// A session is running.
    Recording {
        /// Unique session ID for log correlation.
        session_id: Uuid,
        /// Time since the session was accepted.
        elapsed: Duration,
        /// Segments delivered so far.
        segments_done: u32,
    },
}

impl RecordingState {
    /// Public snapshot of this slot.
    pub(crate) fn status(&self) -> RecordingStatus {
        match self {
            RecordingState::Idle => RecordingStatus::Idle,
            RecordingState::Recording {
                session_id,
                started_at,
                segments_done,
                ..
            } => RecordingStatus::Recording {
                session_id: *session_id,
                elapsed: started_at.elapsed(),
                segments_done: *segments_done,
            },
        }
    }
}
