use crate::readiness::Signature;

use serde::{Deserialize, Serialize};

/// Static handshake credentials.
///
/// Used when no signing backend is wired in; see [`crate::SignatureProvider`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Signature timestamp.
    #[serde(default)]
    pub timestamp: String,
    /// Signature nonce.
    #[serde(default)]
    pub nonce_str: String,
    /// Signature value.
    #[serde(default)]
    pub signature: String,
}

impl From<CredentialsConfig> for Signature {
    fn from(credentials: CredentialsConfig) -> Self {
        Signature {
            timestamp: credentials.timestamp,
            nonce_str: credentials.nonce_str,
            signature: credentials.signature,
        }
    }
}
