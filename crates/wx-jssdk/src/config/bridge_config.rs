use crate::{config::default_js_api_list, host::JsApi};

use serde::{Deserialize, Serialize};

/// Handshake settings sent to the host configuration entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Corporate/application id issued by the host platform.
    #[serde(default)]
    pub app_id: String,

    /// Ask the host to echo every call result.
    #[serde(default)]
    pub debug: bool,

    /// Capabilities declared during the handshake.
    #[serde(default = "default_js_api_list")]
    pub js_api_list: Vec<JsApi>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            debug: false,
            js_api_list: default_js_api_list(),
        }
    }
}
