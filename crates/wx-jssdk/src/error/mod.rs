use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Bridge errors with source location tracking.
///
/// Every failure surfaces on the result of the operation that caused it.
/// Nothing here is retried.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The readiness handshake never succeeded, so no host call is attempted.
    #[error("SDK unavailable: {reason} {location}")]
    SdkUnavailable {
        /// Host error message or signature failure that settled the gate.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Host completed with a status that does not end in `ok`.
    #[error("Host call {operation} failed: {message} {location}")]
    HostCallFailed {
        /// Host entry point that reported the failure.
        operation: &'static str,
        /// Raw status string from the host, unmodified.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Host reported success but left out the payload.
    #[error("Host call {operation} returned ok without a payload {location}")]
    MalformedReply {
        /// Host entry point that produced the reply.
        operation: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A recording session is already active.
    #[error("Recording in progress {location}")]
    RecordingInProgress {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No recording session is active.
    #[error("Recording not started {location}")]
    RecordingNotStarted {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Playback ended for a different clip than the one started.
    #[error("Playback stopped: mismatched id, expected {expected}, got {actual} {location}")]
    SegmentMismatch {
        /// Identifier passed to `play_record`.
        expected: String,
        /// Identifier reported by the playback-ended event.
        actual: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Segment duration is zero or above the host's single-segment limit.
    #[error("Invalid segment duration: {requested_ms}ms (limit {limit_ms}ms) {location}")]
    InvalidSegmentDuration {
        /// Requested per-segment duration in milliseconds.
        requested_ms: u128,
        /// Host ceiling in milliseconds.
        limit_ms: u128,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A session must record at least one segment.
    #[error("Invalid segment count: at least one segment is required {location}")]
    InvalidSegmentCount {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Configuration loading or validation error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Builds an [`CoreError::SdkUnavailable`] at the caller's location.
    #[track_caller]
    pub(crate) fn sdk_unavailable(reason: impl Into<String>) -> Self {
        CoreError::SdkUnavailable {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Builds a [`CoreError::RecordingNotStarted`] at the caller's location.
    #[track_caller]
    pub(crate) fn recording_not_started() -> Self {
        CoreError::RecordingNotStarted {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The host status string, when this error came from a host completion.
    ///
    /// Suitable for direct display: the host provides no structured codes.
    pub fn host_message(&self) -> Option<&str> {
        match self {
            CoreError::HostCallFailed { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CoreError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        CoreError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = StdResult<T, CoreError>;
