//! Configuration management for the bridge.
//!
//! Loads a TOML file from the platform config directory (or a given path)
//! and falls back to defaults when none exists. Nothing is written back.

use crate::{
    CoreError, CoreResult,
    config::{BridgeConfig, CredentialsConfig, MediaConfig, RecordingConfig},
    recording::HOST_SEGMENT_LIMIT,
};

use std::{fs, panic::Location, path::Path, path::PathBuf};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Handshake settings.
    #[serde(default)]
    pub bridge: BridgeConfig,
    /// Static handshake credentials.
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Recording session defaults.
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Image selection defaults.
    #[serde(default)]
    pub media: MediaConfig,
}

impl SdkConfig {
    /// Load configuration from the platform config directory.
    ///
    /// A missing file yields the defaults.
    #[track_caller]
    #[instrument]
    pub fn load() -> CoreResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, or the defaults if it does not exist.
    #[track_caller]
    #[instrument(skip_all)]
    pub fn load_from<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!(config_path = ?path, "No config found, using defaults");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path).map_err(|e| CoreError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config = Self::from_toml_str(&contents)?;

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// Parse and validate a TOML document.
    #[track_caller]
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        let config: SdkConfig = toml::from_str(contents).map_err(|e| CoreError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Check values the host would reject or that cannot produce a session.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        let segment = self.recording.segment();

        if segment.is_zero() || segment > HOST_SEGMENT_LIMIT {
            return Err(CoreError::ConfigError {
                reason: format!(
                    "recording.segment_secs must be between 1 and {}, got {}",
                    HOST_SEGMENT_LIMIT.as_secs(),
                    self.recording.segment_secs
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.recording.max_segments == 0 {
            return Err(CoreError::ConfigError {
                reason: "recording.max_segments must be at least 1".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.media.image_count == 0 {
            return Err(CoreError::ConfigError {
                reason: "media.image_count must be at least 1".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.bridge.app_id.is_empty() && !self.bridge.debug {
            warn!("bridge.app_id is empty; the host will reject the handshake outside debug mode");
        }

        Ok(())
    }

    #[track_caller]
    fn config_path() -> CoreResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "wx-jssdk", "WxJssdk").ok_or_else(|| {
            CoreError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}
