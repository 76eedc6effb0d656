use crate::{
    CoreError, RecordingStatus, Segment,
    tests::{
        mock_host::{MockHost, sdk_for},
        settle,
    },
};

use std::time::Duration;

use futures::StreamExt;

const SEGMENT: Duration = Duration::from_secs(60);

fn local_ids(items: &[crate::CoreResult<Segment>]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.as_ref().ok().map(|s| s.local_id.clone()))
        .collect()
}

/// WHAT: A three-segment session emits three ids in order, then ends
/// WHY: Segment budget exhaustion must close the stream and free the lock
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_three_segment_budget_when_segments_complete_then_three_ids_and_reset() {
    // Given: The host yields s1, s2, s3 on successive stops
    let host = MockHost::ready();
    host.stop_ids(&["s1", "s2", "s3"]);
    let sdk = sdk_for(&host);

    // When: Recording until the session ends on its own
    let items: Vec<_> = sdk.start_recording(SEGMENT, 3).await.unwrap().collect().await;

    // Then: Exactly three segments in completion order, no errors
    assert_eq!(items.len(), 3);
    assert_eq!(local_ids(&items), vec!["s1", "s2", "s3"]);
    let indices: Vec<u32> = items
        .iter()
        .filter_map(|item| item.as_ref().ok().map(|s| s.index))
        .collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(host.count("startRecord"), 3);
    assert_eq!(host.count("stopRecord"), 3);

    // Then: The lock is released and a new session can start
    assert!(!sdk.is_recording().await);
    assert!(sdk.start_recording(SEGMENT, 1).await.is_ok());
}

/// WHAT: Stopping mid-session returns the in-progress segment and resets
/// WHY: An explicit stop is the normal way to end long recordings
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_active_session_when_stopping_then_segment_emitted_and_state_reset() {
    // Given: A session waiting inside its first segment
    let host = MockHost::ready();
    host.stop_ids(&["s1"]);
    let sdk = sdk_for(&host);
    let mut segments = sdk.start_recording(SEGMENT, 3).await.unwrap();
    settle().await;

    // When: Stopping explicitly
    let stopped = sdk.stop_recording().await;

    // Then: The caller and the stream both get the segment, then the stream ends
    assert_eq!(
        stopped.ok(),
        Some(Segment {
            index: 0,
            local_id: "s1".to_string(),
        })
    );
    let next = segments.next().await;
    assert!(matches!(next, Some(Ok(Segment { ref local_id, .. })) if local_id == "s1"));
    assert!(segments.next().await.is_none());
    assert_eq!(host.count("stopRecord"), 1);

    // Then: A new session starts without error
    assert_eq!(sdk.recording_status().await, RecordingStatus::Idle);
    assert!(sdk.start_recording(SEGMENT, 3).await.is_ok());
}

/// WHAT: Stopping with no active session fails
/// WHY: There is no segment to finalize
#[tokio::test]
async fn given_no_session_when_stopping_then_recording_not_started() {
    // Given: A fresh bridge
    let host = MockHost::ready();
    let sdk = sdk_for(&host);

    // When: Stopping
    let result = sdk.stop_recording().await;

    // Then: RecordingNotStarted, and nothing reached the host
    assert!(matches!(result, Err(CoreError::RecordingNotStarted { .. })));
    assert!(host.calls().is_empty());
}

/// WHAT: Starting while a session is active fails without host calls
/// WHY: Only one recording session may exist at a time
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_active_session_when_starting_again_then_recording_in_progress() {
    // Given: A session blocked on a held handshake
    let host = MockHost::held_handshake();
    let sdk = sdk_for(&host);
    let _segments = sdk.start_recording(SEGMENT, 3).await.unwrap();
    settle().await;
    let calls_before = host.calls();

    // When: Starting a second session
    let second = sdk.start_recording(SEGMENT, 3).await;
    settle().await;

    // Then: RecordingInProgress and no additional host traffic
    assert!(matches!(second, Err(CoreError::RecordingInProgress { .. })));
    assert_eq!(host.calls(), calls_before);
    assert!(sdk.is_recording().await);
}

/// WHAT: Segment lengths outside the host limit are rejected up front
/// WHY: Longer segments trigger a host interstitial the page cannot control
#[tokio::test]
async fn given_invalid_parameters_when_starting_then_rejected_without_session() {
    // Given: A fresh bridge
    let host = MockHost::ready();
    let sdk = sdk_for(&host);

    // When: Starting with a too long, a zero length and a zero count
    let too_long = sdk.start_recording(Duration::from_secs(61), 3).await;
    let zero = sdk.start_recording(Duration::ZERO, 3).await;
    let no_segments = sdk.start_recording(SEGMENT, 0).await;

    // Then: Each is rejected, no session exists and the host saw nothing
    assert!(matches!(
        too_long,
        Err(CoreError::InvalidSegmentDuration {
            requested_ms: 61_000,
            limit_ms: 60_000,
            ..
        })
    ));
    assert!(matches!(
        zero,
        Err(CoreError::InvalidSegmentDuration { .. })
    ));
    assert!(matches!(
        no_segments,
        Err(CoreError::InvalidSegmentCount { .. })
    ));
    assert!(!sdk.is_recording().await);
    assert!(host.calls().is_empty());
}

/// WHAT: A large segment count is accepted
/// WHY: The soft threshold only logs a caution
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_count_above_soft_threshold_when_starting_then_accepted() {
    // Given: A fresh bridge
    let host = MockHost::ready();
    let sdk = sdk_for(&host);

    // When: Asking for more segments than the caution threshold
    let result = sdk
        .start_recording(SEGMENT, crate::MAX_SEGMENTS_WARN_THRESHOLD + 1)
        .await;

    // Then: The session starts and can be stopped normally
    assert!(result.is_ok());
    settle().await;
    assert!(sdk.stop_recording().await.is_ok());
}

/// WHAT: Segments keep flowing when the host never confirms a start
/// WHY: Some devices never fire the start callback
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_silent_start_callback_when_recording_then_fallback_confirms() {
    // Given: A host that never confirms segment starts
    let host = MockHost::ready();
    host.silent_start();
    host.stop_ids(&["s1", "s2"]);
    let sdk = sdk_for(&host);

    // When: Recording two short segments
    let items: Vec<_> = sdk
        .start_recording(Duration::from_secs(5), 2)
        .await
        .unwrap()
        .collect()
        .await;

    // Then: Both segments are delivered regardless
    assert_eq!(local_ids(&items), vec!["s1", "s2"]);
    assert_eq!(host.count("startRecord"), 2);
}

/// WHAT: A host-side auto-stop counts as a completed segment
/// WHY: The host ends segments at its own time limit
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_host_auto_stop_when_recording_then_segment_emitted_without_stop_call() {
    // Given: The host auto-ends the first segment, the second ends on the timer
    let host = MockHost::ready();
    host.auto_end(&["h1"]);
    host.stop_ids(&["s2"]);
    let sdk = sdk_for(&host);

    // When: Recording two segments
    let items: Vec<_> = sdk.start_recording(SEGMENT, 2).await.unwrap().collect().await;

    // Then: Both ids arrive and only the second needed a stop call
    assert_eq!(local_ids(&items), vec!["h1", "s2"]);
    assert_eq!(host.count("stopRecord"), 1);
}

/// WHAT: A failed explicit stop reports the error but still tears down
/// WHY: Segment loss is reported, never retried, and must not leak state
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_failing_stop_when_stopping_then_error_and_session_closed() {
    // Given: A running session whose stop will fail
    let host = MockHost::ready();
    host.fail("stopRecord", "stopRecord:fail");
    let sdk = sdk_for(&host);
    let segments = sdk.start_recording(SEGMENT, 3).await.unwrap();
    settle().await;

    // When: Stopping
    let result = sdk.stop_recording().await;

    // Then: The caller sees the host message and the stream closes cleanly
    assert_eq!(
        result.as_ref().err().and_then(CoreError::host_message),
        Some("stopRecord:fail")
    );
    let items: Vec<_> = segments.collect().await;
    assert!(items.is_empty());
    assert!(!sdk.is_recording().await);
}

/// WHAT: A failed timed stop fails the stream and frees the lock
/// WHY: Host failures surface on the session stream
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_failing_timed_stop_when_recording_then_stream_fails() {
    // Given: A host whose stop always fails
    let host = MockHost::ready();
    host.fail("stopRecord", "stopRecord:fail no permission");
    let sdk = sdk_for(&host);

    // When: Letting the first segment run out
    let items: Vec<_> = sdk.start_recording(SEGMENT, 3).await.unwrap().collect().await;

    // Then: One error with the host message, then the end of the stream
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].as_ref().err().and_then(CoreError::host_message),
        Some("stopRecord:fail no permission")
    );
    assert!(!sdk.is_recording().await);
}

/// WHAT: A failed handshake is delivered on the segment stream
/// WHY: Recording must never touch the host without a ready SDK
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failed_gate_when_recording_then_sdk_unavailable_on_stream() {
    // Given: A host that rejects the handshake
    let host = MockHost::failing_handshake("config:fail");
    let sdk = sdk_for(&host);

    // When: Starting a session
    let items: Vec<_> = sdk.start_recording(SEGMENT, 3).await.unwrap().collect().await;

    // Then: The stream fails as unavailable and no recording call was made
    assert!(matches!(
        items.as_slice(),
        [Err(CoreError::SdkUnavailable { .. })]
    ));
    assert_eq!(host.count("startRecord"), 0);
    assert!(!sdk.is_recording().await);
}

/// WHAT: Status reports progress of the running session
/// WHY: UI code shows how many segments are done
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_one_finished_segment_when_reading_status_then_progress_reported() {
    // Given: A session with 10 second segments
    let host = MockHost::ready();
    let sdk = sdk_for(&host);
    let mut segments = sdk
        .start_recording(Duration::from_secs(10), 3)
        .await
        .unwrap();

    // When: The first segment completes
    let first = segments.next().await;
    settle().await;

    // Then: Status shows one segment done
    assert!(matches!(first, Some(Ok(Segment { index: 0, .. }))));
    assert!(matches!(
        sdk.recording_status().await,
        RecordingStatus::Recording {
            segments_done: 1,
            ..
        }
    ));
    assert!(sdk.stop_recording().await.is_ok());
}

/// WHAT: Dropping the segment stream does not end the session
/// WHY: The host cannot cancel; only stop or exhaustion ends a session
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_dropped_stream_when_session_running_then_session_still_active() {
    // Given: A session whose consumer goes away
    let host = MockHost::ready();
    let sdk = sdk_for(&host);
    let segments = sdk.start_recording(SEGMENT, 3).await.unwrap();
    drop(segments);

    // When: A full segment elapses
    tokio::time::sleep(Duration::from_secs(61)).await;

    // Then: The session is still running and can be stopped
    assert!(sdk.is_recording().await);
    assert_eq!(host.count("stopRecord"), 1);
    let stopped = sdk.stop_recording().await;
    assert!(stopped.is_ok());
    assert!(!sdk.is_recording().await);
}

/// WHAT: The default session uses the configured segment length and count
/// WHY: Callers start recordings without repeating the limits
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_recording_config_when_starting_default_then_configured_budget_used() {
    // Given: A bridge configured for two 10 second segments
    let host = MockHost::ready();
    host.stop_ids(&["d1", "d2"]);
    let mut sdk = sdk_for(&host);
    let mut config = (*sdk.config).clone();
    config.recording.segment_secs = 10;
    config.recording.max_segments = 2;
    sdk.config = std::sync::Arc::new(config);

    // When: Recording with the defaults until the session ends
    let started = tokio::time::Instant::now();
    let items: Vec<_> = sdk.start_default_recording().await.unwrap().collect().await;

    // Then: Two segments, ending after two segment lengths
    assert_eq!(local_ids(&items), vec!["d1", "d2"]);
    assert!(started.elapsed() >= Duration::from_secs(20));
    assert!(started.elapsed() < Duration::from_secs(60));
}

/// WHAT: A stop that lands while a timed segment is closing returns that segment
/// WHY: No new segment may start once a stop has been requested
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_stop_during_timed_segment_close_when_stopping_then_no_new_segment_started() {
    // Given: 10 second segments and a host that takes a second to stop
    let host = MockHost::ready();
    host.slow_stop(Duration::from_secs(1));
    host.stop_ids(&["s1", "s2"]);
    let sdk = sdk_for(&host);
    let segments = sdk
        .start_recording(Duration::from_secs(10), 3)
        .await
        .unwrap();

    // When: Stopping while the first segment's stop is in flight
    tokio::time::sleep(Duration::from_millis(10_500)).await;
    assert_eq!(host.count("stopRecord"), 1);
    let stopped = sdk.stop_recording().await;

    // Then: The caller gets the segment that was closing, and nothing restarted
    assert_eq!(
        stopped.ok(),
        Some(Segment {
            index: 0,
            local_id: "s1".to_string(),
        })
    );
    assert_eq!(host.count("startRecord"), 1);
    assert_eq!(host.count("stopRecord"), 1);

    // Then: The stream carried that segment once and ended
    let items: Vec<_> = segments.collect().await;
    assert_eq!(local_ids(&items), vec!["s1"]);
    assert!(!sdk.is_recording().await);
}

/// WHAT: A stop issued before the handshake completes records nothing
/// WHY: No recording was running when the stop was requested
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_stop_before_handshake_when_gate_opens_then_recording_not_started() {
    // Given: A session waiting on a held handshake
    let host = MockHost::held_handshake();
    let sdk = sdk_for(&host);
    let segments = sdk.start_recording(SEGMENT, 3).await.unwrap();
    settle().await;

    // When: Stopping, then letting the handshake complete
    let stopper = tokio::spawn({
        let sdk = sdk.clone();
        async move { sdk.stop_recording().await }
    });
    settle().await;
    host.release_handshake();
    let result = stopper.await.unwrap();

    // Then: Not started, no recording call reached the host, the stream is empty
    assert!(matches!(result, Err(CoreError::RecordingNotStarted { .. })));
    assert_eq!(host.count("startRecord"), 0);
    assert_eq!(host.count("stopRecord"), 0);
    let items: Vec<_> = segments.collect().await;
    assert!(items.is_empty());
    assert!(!sdk.is_recording().await);
}
