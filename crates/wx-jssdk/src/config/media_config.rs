use crate::config::default_image_count;

use serde::{Deserialize, Serialize};

/// Image selection defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Images offered by `choose_default_images`.
    #[serde(default = "default_image_count")]
    pub image_count: u32,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            image_count: default_image_count(),
        }
    }
}
