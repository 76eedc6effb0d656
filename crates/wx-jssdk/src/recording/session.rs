//! Segment loop of one recording session.
//!
//! The driver task owns every recording call to the host, so there is
//! never more than one segment in flight. External stop requests reach it
//! over a channel and are answered once the session has been torn down.

use crate::{
    CoreError, CoreResult, WxSdk,
    host::{HostReply, JsApi},
    recording::RecordingState,
    stream::OpSink,
    types::Segment,
};

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Request from `stop_recording` to finalize the current segment.
#[derive(Debug)]
pub(crate) struct StopRequest {
    pub(crate) reply: oneshot::Sender<CoreResult<Segment>>,
}

enum SegmentEnd {
    Stop(StopRequest),
    HostEnded(HostReply<String>),
    TimerElapsed,
}

enum SessionOutcome {
    /// Segment budget used up.
    Exhausted,
    /// Ended by `stop_recording`; `result` goes back to that caller.
    Stopped {
        reply: oneshot::Sender<CoreResult<Segment>>,
        result: CoreResult<Segment>,
    },
    /// Gate or host failure; reported on the segment stream.
    Failed(CoreError),
}

pub(crate) struct RecordingSession {
    pub(crate) sdk: WxSdk,
    pub(crate) session_id: Uuid,
    pub(crate) segment: Duration,
    pub(crate) max_segments: u32,
    pub(crate) start_fallback: Duration,
    pub(crate) sink: OpSink<Segment>,
    pub(crate) stop_rx: mpsc::Receiver<StopRequest>,
}

impl RecordingSession {
    /// Runs the session to completion and tears it down.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub(crate) async fn run(mut self) {
        let outcome = self.drive().await;
        self.finish(outcome).await;
    }

    async fn drive(&mut self) -> SessionOutcome {
        if let Err(e) = self.sdk.gate.ensure_ready().await {
            return SessionOutcome::Failed(e);
        }

        // Nothing was recording while the handshake was pending.
        if let Ok(request) = self.stop_rx.try_recv() {
            return SessionOutcome::Stopped {
                reply: request.reply,
                result: Err(CoreError::recording_not_started()),
            };
        }

        let mut index = 0u32;

        loop {
            if let Err(e) = self.begin_segment(index).await {
                return SessionOutcome::Failed(e);
            }

            let end = tokio::select! {
                biased;
                Some(request) = self.stop_rx.recv() => SegmentEnd::Stop(request),
                reply = self.sdk.host.voice_record_end() => SegmentEnd::HostEnded(reply),
                _ = tokio::time::sleep(self.segment) => SegmentEnd::TimerElapsed,
            };

            let local_id = match end {
                SegmentEnd::Stop(request) => {
                    let result = self
                        .stop_segment()
                        .await
                        .map(|local_id| Segment { index, local_id });

                    if let Ok(segment) = &result {
                        self.sink.emit(segment.clone());
                    }

                    return SessionOutcome::Stopped {
                        reply: request.reply,
                        result,
                    };
                }
                SegmentEnd::HostEnded(reply) => {
                    debug!(index, "Host ended segment at its time limit");
                    reply.into_result(JsApi::OnVoiceRecordEnd.as_str())
                }
                SegmentEnd::TimerElapsed => self.stop_segment().await,
            };

            let local_id = match local_id {
                Ok(local_id) => local_id,
                Err(e) => return SessionOutcome::Failed(e),
            };

            debug!(index, local_id = %local_id, "Segment recorded");

            let segment = Segment { index, local_id };
            if !self.sink.emit(segment.clone()) {
                debug!(index, "Segment consumer detached, session continues");
            }

            index += 1;
            self.record_progress(index).await;

            // A stop that arrived while the segment was closing ends the
            // session on that segment.
            if let Ok(request) = self.stop_rx.try_recv() {
                return SessionOutcome::Stopped {
                    reply: request.reply,
                    result: Ok(segment),
                };
            }

            if index >= self.max_segments {
                return SessionOutcome::Exhausted;
            }
        }
    }

    /// Starts one segment. The host confirmation and the fallback delay
    /// race; whichever comes first counts as "segment underway".
    async fn begin_segment(&self, index: u32) -> CoreResult<()> {
        tokio::select! {
            reply = self.sdk.host.start_record() => {
                reply.into_result(JsApi::StartRecord.as_str())?;
                debug!(index, "Segment start confirmed by host");
            }
            _ = tokio::time::sleep(self.start_fallback) => {
                debug!(
                    index,
                    fallback_ms = self.start_fallback.as_millis(),
                    "No start confirmation from host, assuming segment started"
                );
            }
        }

        Ok(())
    }

    async fn stop_segment(&self) -> CoreResult<String> {
        self.sdk
            .host
            .stop_record()
            .await
            .into_result(JsApi::StopRecord.as_str())
    }

    async fn record_progress(&self, done: u32) {
        let mut state = self.sdk.recording.lock().await;

        match &mut *state {
            RecordingState::Recording {
                session_id,
                segments_done,
                ..
            } if *session_id == self.session_id => *segments_done = done,
            _ => {}
        }
    }

    /// Clears the session slot, then closes the stream and answers any
    /// stop caller. Pending stop requests are dropped, so their callers see
    /// the session as not started.
    async fn finish(self, outcome: SessionOutcome) {
        {
            let mut state = self.sdk.recording.lock().await;
            if state.is_session(self.session_id) {
                *state = RecordingState::Idle;
            }
        }

        let RecordingSession { sink, stop_rx, .. } = self;
        drop(stop_rx);

        match outcome {
            SessionOutcome::Exhausted => {
                info!("Recording finished, segment budget used up");
                drop(sink);
            }
            SessionOutcome::Stopped { reply, result } => {
                match &result {
                    Ok(segment) => info!(index = segment.index, "Recording stopped"),
                    Err(CoreError::RecordingNotStarted { .. }) => {
                        info!("Recording stopped before the first segment started")
                    }
                    Err(e) => warn!(error = %e, "Recording stopped, final segment lost"),
                }
                drop(sink);
                if reply.send(result).is_err() {
                    debug!("Stop caller went away before the reply");
                }
            }
            SessionOutcome::Failed(e) => {
                error!(error = %e, "Recording failed");
                sink.fail(e);
            }
        }
    }
}
