mod bridge_config;
#[allow(clippy::module_inception)]
mod config;
mod credentials_config;
mod media_config;
mod recording_config;

pub use {
    bridge_config::BridgeConfig, config::SdkConfig, credentials_config::CredentialsConfig,
    media_config::MediaConfig, recording_config::RecordingConfig,
};

use crate::host::JsApi;

pub(crate) const DEFAULT_IMAGE_COUNT: u32 = 9;
pub(crate) const DEFAULT_SEGMENT_SECS: u64 = 60;
pub(crate) const DEFAULT_MAX_SEGMENTS: u32 = 120;
pub(crate) const DEFAULT_START_FALLBACK_MS: u64 = 300;

pub(crate) fn default_image_count() -> u32 {
    DEFAULT_IMAGE_COUNT
}

pub(crate) fn default_segment_secs() -> u64 {
    DEFAULT_SEGMENT_SECS
}

pub(crate) fn default_max_segments() -> u32 {
    DEFAULT_MAX_SEGMENTS
}

pub(crate) fn default_start_fallback_ms() -> u64 {
    DEFAULT_START_FALLBACK_MS
}

pub(crate) fn default_js_api_list() -> Vec<JsApi> {
    JsApi::ALL.to_vec()
}
