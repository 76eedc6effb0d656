use crate::config::{default_max_segments, default_segment_secs, default_start_fallback_ms};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Recording session defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Length of one segment in seconds. Must not exceed the host limit.
    #[serde(default = "default_segment_secs")]
    pub segment_secs: u64,

    /// Segments recorded before the session ends on its own.
    #[serde(default = "default_max_segments")]
    pub max_segments: u32,

    /// How long to wait for the host's start confirmation before assuming
    /// the segment is running anyway.
    #[serde(default = "default_start_fallback_ms")]
    pub start_fallback_ms: u64,
}

impl RecordingConfig {
    /// Segment length as a [`Duration`].
    pub fn segment(&self) -> Duration {
        Duration::from_secs(self.segment_secs)
    }

    /// Start-confirmation fallback as a [`Duration`].
    pub fn start_fallback(&self) -> Duration {
        Duration::from_millis(self.start_fallback_ms)
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            segment_secs: default_segment_secs(),
            max_segments: default_max_segments(),
            start_fallback_ms: default_start_fallback_ms(),
        }
    }
}
