//! Segmented recording sessions with a single-session lock.

mod recording_state;
mod session;

pub(crate) use {recording_state::RecordingState, session::StopRequest};

pub use recording_state::RecordingStatus;

use crate::{
    CoreError, CoreResult, WxSdk, recording::session::RecordingSession, stream::OpStream,
    types::Segment,
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use tokio::{
    sync::{mpsc, oneshot},
    time::Instant,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Longest single segment the host will record.
///
/// Past this the host stops on its own and may show an interstitial the
/// page cannot dismiss, so longer segments are rejected up front.
pub const HOST_SEGMENT_LIMIT: Duration = Duration::from_secs(60);

/// Segment counts above this are allowed but logged as a caution.
pub const MAX_SEGMENTS_WARN_THRESHOLD: u32 = 120;

/// Stream of completed segments for one recording session.
pub type SegmentStream = OpStream<Segment>;

impl WxSdk {
    /// Starts a session that records up to `max_segments` segments of
    /// `segment` each, back to back.
    ///
    /// The session runs on its own task. Each finished segment is pushed
    /// onto the returned stream, which ends when the budget is used up or
    /// [`Self::stop_recording`] is called. A readiness or host failure is
    /// delivered as the stream's final item. Dropping the stream does not
    /// stop the session.
    ///
    /// # Errors
    ///
    /// - [`CoreError::RecordingInProgress`] if a session is already active.
    /// - [`CoreError::InvalidSegmentDuration`] if `segment` is zero or above
    ///   [`HOST_SEGMENT_LIMIT`].
    /// - [`CoreError::InvalidSegmentCount`] if `max_segments` is zero.
    #[instrument(skip(self))]
    pub async fn start_recording(
        &self,
        segment: Duration,
        max_segments: u32,
    ) -> CoreResult<SegmentStream> {
        validate_segment(segment)?;
        validate_segment_count(max_segments)?;

        let mut state = self.recording.lock().await;

        if let RecordingState::Recording { session_id, .. } = &*state {
            warn!(active_session = %session_id, "Recording already in progress");
            return Err(CoreError::RecordingInProgress {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let session_id = Uuid::new_v4();
        let (stop_tx, stop_rx) = mpsc::channel(1);
        let (sink, stream) = OpStream::channel();

        *state = RecordingState::Recording {
            session_id,
            started_at: Instant::now(),
            segments_done: 0,
            stop_tx,
        };
        drop(state);

        let session = RecordingSession {
            sdk: self.clone(),
            session_id,
            segment,
            max_segments,
            start_fallback: self.config.recording.start_fallback(),
            sink,
            stop_rx,
        };
        tokio::spawn(session.run());

        info!(
            session_id = %session_id,
            segment_ms = segment.as_millis(),
            max_segments,
            "Recording started"
        );

        Ok(stream)
    }

    /// [`Self::start_recording`] with the configured segment length and count.
    pub async fn start_default_recording(&self) -> CoreResult<SegmentStream> {
        let recording = &self.config.recording;
        self.start_recording(recording.segment(), recording.max_segments)
            .await
    }

    /// Finalizes the current segment and ends the session.
    ///
    /// On success the segment is also pushed onto the session stream. The
    /// session is torn down either way; a host failure loses the segment.
    /// A stop that lands while a segment is closing returns that segment
    /// and no further segment is started.
    ///
    /// # Errors
    ///
    /// - [`CoreError::RecordingNotStarted`] if no session is active, or the
    ///   session was still waiting on the handshake.
    /// - [`CoreError::HostCallFailed`] if the host could not stop.
    #[instrument(skip(self))]
    pub async fn stop_recording(&self) -> CoreResult<Segment> {
        let stop_tx = {
            let state = self.recording.lock().await;
            match &*state {
                RecordingState::Idle => return Err(CoreError::recording_not_started()),
                RecordingState::Recording { stop_tx, .. } => stop_tx.clone(),
            }
        };

        let (reply, reply_rx) = oneshot::channel();

        // The driver drops its receiver on teardown, so a session that ends
        // between the check above and here reads as not started.
        stop_tx
            .send(StopRequest { reply })
            .await
            .map_err(|_| CoreError::recording_not_started())?;

        reply_rx
            .await
            .map_err(|_| CoreError::recording_not_started())?
    }

    /// Snapshot of the recording session.
    pub async fn recording_status(&self) -> RecordingStatus {
        self.recording.lock().await.status()
    }

    /// Whether a recording session is active.
    pub async fn is_recording(&self) -> bool {
        matches!(
            *self.recording.lock().await,
            RecordingState::Recording { .. }
        )
    }
}

#[track_caller]
fn validate_segment(segment: Duration) -> CoreResult<()> {
    if segment.is_zero() || segment > HOST_SEGMENT_LIMIT {
        return Err(CoreError::InvalidSegmentDuration {
            requested_ms: segment.as_millis(),
            limit_ms: HOST_SEGMENT_LIMIT.as_millis(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

#[track_caller]
fn validate_segment_count(max_segments: u32) -> CoreResult<()> {
    if max_segments == 0 {
        return Err(CoreError::InvalidSegmentCount {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if max_segments > MAX_SEGMENTS_WARN_THRESHOLD {
        warn!(
            max_segments,
            threshold = MAX_SEGMENTS_WARN_THRESHOLD,
            "Long recording session requested"
        );
    }

    Ok(())
}
