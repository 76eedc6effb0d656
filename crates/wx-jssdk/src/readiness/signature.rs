use crate::CoreResult;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Credentials the host checks during the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// Time the signature was generated.
    pub timestamp: String,
    /// Random string mixed into the signature.
    pub nonce_str: String,
    /// Signature over the current page URL.
    pub signature: String,
}

/// Source of handshake credentials, usually a backend signing endpoint.
#[async_trait]
pub trait SignatureProvider: Send + Sync {
    /// Fetch credentials for the current page.
    async fn signature(&self) -> CoreResult<Signature>;
}

/// Fixed credentials, e.g. from the config file.
#[async_trait]
impl SignatureProvider for Signature {
    async fn signature(&self) -> CoreResult<Signature> {
        Ok(self.clone())
    }
}
