//! One-shot readiness handshake shared by every operation.

use crate::{
    CoreError, CoreResult,
    config::BridgeConfig,
    host::{ConfigRequest, Host, ReadySignal},
    readiness::SignatureProvider,
};

use std::sync::{Arc, Mutex};

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use tracing::{debug, error, info, instrument};

/// Settled handshake: `Err` carries the reason the gate failed.
type HandshakeOutcome = Result<(), String>;

type Handshake = Shared<BoxFuture<'static, HandshakeOutcome>>;

/// Observable state of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessState {
    /// No operation has asked for the SDK yet.
    Uninitialized,
    /// Handshake in flight; all callers wait on it.
    Pending,
    /// Host signalled ready.
    Ready,
    /// Handshake failed. Terminal for the lifetime of the gate.
    Failed(String),
}

/// Lazily performs the host handshake once and caches the outcome.
///
/// The in-flight handshake is stored as a shared future, so concurrent
/// callers await the same host call and a caller that gives up mid-way
/// does not cause a second one.
pub struct ReadinessGate {
    host: Arc<dyn Host>,
    signer: Arc<dyn SignatureProvider>,
    bridge: BridgeConfig,
    handshake: Mutex<Option<Handshake>>,
}

impl ReadinessGate {
    /// Creates a gate that has not contacted the host yet.
    pub fn new(
        host: Arc<dyn Host>,
        signer: Arc<dyn SignatureProvider>,
        bridge: BridgeConfig,
    ) -> Self {
        Self {
            host,
            signer,
            bridge,
            handshake: Mutex::new(None),
        }
    }

    /// Waits until the SDK is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SdkUnavailable`] if the handshake failed, now or
    /// on any earlier call.
    pub async fn ensure_ready(&self) -> CoreResult<()> {
        let handshake = self.handshake();

        handshake.await.map_err(CoreError::sdk_unavailable)
    }

    /// Current gate state without triggering the handshake.
    pub fn state(&self) -> ReadinessState {
        let slot = self.handshake.lock().unwrap_or_else(|e| e.into_inner());

        match slot.as_ref() {
            None => ReadinessState::Uninitialized,
            Some(handshake) => match handshake.peek() {
                None => ReadinessState::Pending,
                Some(Ok(())) => ReadinessState::Ready,
                Some(Err(reason)) => ReadinessState::Failed(reason.clone()),
            },
        }
    }

    fn handshake(&self) -> Handshake {
        // The slot only ever goes from None to Some, so a poisoned lock
        // still holds a consistent value.
        let mut slot = self.handshake.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(handshake) = slot.as_ref() {
            return handshake.clone();
        }

        let handshake = Self::perform(
            Arc::clone(&self.host),
            Arc::clone(&self.signer),
            self.bridge.clone(),
        )
        .boxed()
        .shared();

        *slot = Some(handshake.clone());
        debug!("SDK handshake scheduled");

        handshake
    }

    #[instrument(skip_all, fields(app_id = %bridge.app_id))]
    async fn perform(
        host: Arc<dyn Host>,
        signer: Arc<dyn SignatureProvider>,
        bridge: BridgeConfig,
    ) -> HandshakeOutcome {
        let signature = match signer.signature().await {
            Ok(signature) => signature,
            Err(e) => {
                error!(error = %e, "Failed to obtain handshake signature");
                return Err(e.to_string());
            }
        };

        let request = ConfigRequest {
            beta: true,
            debug: bridge.debug,
            app_id: bridge.app_id,
            timestamp: signature.timestamp,
            nonce_str: signature.nonce_str,
            signature: signature.signature,
            js_api_list: bridge.js_api_list,
        };

        match host.config(request).await {
            ReadySignal::Ready => {
                info!("SDK ready");
                Ok(())
            }
            ReadySignal::Error(message) => {
                error!(error = %message, "SDK handshake failed");
                Err(message)
            }
        }
    }
}
