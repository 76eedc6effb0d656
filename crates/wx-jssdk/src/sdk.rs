//! Capability façade over the host SDK.
//!
//! Every operation waits on the readiness gate, issues exactly one host
//! call (image selection issues one fetch per picked image), and maps the
//! host completion onto a typed result. Nothing is retried.

use crate::{
    CoreError, CoreResult,
    config::SdkConfig,
    host::{ChooseImageRequest, GetLocationRequest, Host, JsApi, UploadRequest},
    readiness::{ReadinessGate, ReadinessState, Signature, SignatureProvider},
    recording::RecordingState,
    stream::{OpSink, OpStream},
    types::{ImageData, Location, LocationInfo, UploadInfo},
};

use std::{panic::Location as CallerLocation, sync::Arc};

use error_location::ErrorLocation;
use futures::future::{self, Either};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Bridge to the host SDK.
///
/// Owns the readiness gate and the recording session state. Clones share
/// both, so one instance per page context is the intended use.
///
/// # Runtime
///
/// Stream-returning operations spawn a producer task and must be called
/// from within a tokio runtime.
#[derive(Clone)]
pub struct WxSdk {
    pub(crate) host: Arc<dyn Host>,
    pub(crate) gate: Arc<ReadinessGate>,
    pub(crate) recording: Arc<Mutex<RecordingState>>,
    pub(crate) config: Arc<SdkConfig>,
}

impl WxSdk {
    /// Creates a bridge that signs the handshake with `signer`.
    ///
    /// No host call is made until the first operation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigError`] if `config` fails validation.
    #[track_caller]
    #[instrument(skip_all)]
    pub fn new(
        host: Arc<dyn Host>,
        signer: Arc<dyn SignatureProvider>,
        config: SdkConfig,
    ) -> CoreResult<Self> {
        config.validate()?;

        let gate = ReadinessGate::new(Arc::clone(&host), signer, config.bridge.clone());

        info!(
            app_id = %config.bridge.app_id,
            capabilities = config.bridge.js_api_list.len(),
            "WxSdk initialized"
        );

        Ok(Self {
            host,
            gate: Arc::new(gate),
            recording: Arc::new(Mutex::new(RecordingState::Idle)),
            config: Arc::new(config),
        })
    }

    /// Creates a bridge that signs the handshake with the credentials
    /// from `config`.
    #[track_caller]
    pub fn with_static_credentials(host: Arc<dyn Host>, config: SdkConfig) -> CoreResult<Self> {
        let signer: Signature = config.credentials.clone().into();
        Self::new(host, Arc::new(signer), config)
    }

    /// Waits for the handshake, performing it on first use.
    pub async fn ensure_ready(&self) -> CoreResult<()> {
        self.gate.ensure_ready().await
    }

    /// Current readiness without triggering the handshake.
    pub fn readiness(&self) -> ReadinessState {
        self.gate.state()
    }

    /// The validated configuration this bridge runs with.
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Lets the user pick up to `count` images and streams their data.
    ///
    /// Image data is fetched one image at a time in selection order, so
    /// the host bridge never sees two fetches at once. Dropping the stream
    /// skips the fetches that have not started yet.
    #[instrument(skip(self))]
    pub fn choose_images(&self, count: u32) -> OpStream<ImageData> {
        let (sink, stream) = OpStream::channel();
        let sdk = self.clone();

        tokio::spawn(async move {
            if let Err(e) = sdk.deliver_images(count, &sink).await {
                debug!(error = %e, "Image selection failed");
                sink.fail(e);
            }
        });

        stream
    }

    /// [`Self::choose_images`] with the configured default count.
    pub fn choose_default_images(&self) -> OpStream<ImageData> {
        self.choose_images(self.config.media.image_count)
    }

    async fn deliver_images(&self, count: u32, sink: &OpSink<ImageData>) -> CoreResult<()> {
        self.gate.ensure_ready().await?;

        let local_ids = self
            .host
            .choose_image(ChooseImageRequest::original(count))
            .await
            .into_result(JsApi::ChooseImage.as_str())?;

        debug!(selected = local_ids.len(), "Images selected");

        for local_id in local_ids {
            if sink.is_closed() {
                debug!("Image consumer detached, skipping remaining fetches");
                return Ok(());
            }

            let data = self
                .host
                .get_local_img_data(&local_id)
                .await
                .into_result(JsApi::GetLocalImgData.as_str())?;

            if !sink.emit(ImageData { local_id, data }) {
                return Ok(());
            }
        }

        Ok(())
    }

    /// Uploads a local image to the host's media server.
    #[instrument(skip(self))]
    pub async fn upload_image(&self, local_id: &str) -> CoreResult<UploadInfo> {
        self.gate.ensure_ready().await?;

        let server_id = self
            .host
            .upload_image(UploadRequest::quiet(local_id))
            .await
            .into_result(JsApi::UploadImage.as_str())?;

        debug!(server_id = %server_id, "Image uploaded");

        Ok(UploadInfo {
            local_id: local_id.to_string(),
            server_id,
        })
    }

    /// Shows `info` in the host map view.
    #[instrument(skip(self))]
    pub async fn open_location(&self, info: &LocationInfo) -> CoreResult<()> {
        self.gate.ensure_ready().await?;

        self.host
            .open_location(info.clone())
            .await
            .into_result(JsApi::OpenLocation.as_str())
    }

    /// Reads the device location in map-view (`gcj02`) coordinates.
    #[instrument(skip(self))]
    pub async fn get_location(&self) -> CoreResult<Location> {
        self.gate.ensure_ready().await?;

        self.host
            .get_location(GetLocationRequest::default())
            .await
            .into_result(JsApi::GetLocation.as_str())
    }

    /// Uploads a recorded segment to the host's media server.
    #[instrument(skip(self))]
    pub async fn upload_record(&self, local_id: &str) -> CoreResult<UploadInfo> {
        self.gate.ensure_ready().await?;

        let server_id = self
            .host
            .upload_voice(UploadRequest::quiet(local_id))
            .await
            .into_result(JsApi::UploadVoice.as_str())?;

        debug!(server_id = %server_id, "Recording uploaded");

        Ok(UploadInfo {
            local_id: local_id.to_string(),
            server_id,
        })
    }

    /// Plays a recorded segment and resolves when it finishes.
    ///
    /// The host's playback-ended listener is global. If the first ended
    /// event names another clip, this fails with
    /// [`CoreError::SegmentMismatch`] instead of waiting further.
    #[instrument(skip(self))]
    pub async fn play_record(&self, record_id: &str) -> CoreResult<()> {
        self.gate.ensure_ready().await?;

        // The listener is polled before playback starts so a short clip's
        // end event cannot slip past it.
        let listener = self.host.voice_play_end();
        let playing = self.host.play_voice(record_id);

        let ended = match future::select(listener, playing).await {
            Either::Left((ended, playing)) => {
                playing.await.into_result(JsApi::PlayVoice.as_str())?;
                ended
            }
            Either::Right((played, listener)) => {
                played.into_result(JsApi::PlayVoice.as_str())?;
                listener.await
            }
        }
        .into_result(JsApi::OnVoicePlayEnd.as_str())?;

        if ended != record_id {
            return Err(CoreError::SegmentMismatch {
                expected: record_id.to_string(),
                actual: ended,
                location: ErrorLocation::from(CallerLocation::caller()),
            });
        }

        debug!("Playback finished");

        Ok(())
    }

    /// Stops playback of a recorded segment.
    #[instrument(skip(self))]
    pub async fn play_stop(&self, record_id: &str) -> CoreResult<()> {
        self.gate.ensure_ready().await?;

        self.host
            .stop_voice(record_id)
            .await
            .into_result(JsApi::StopVoice.as_str())
    }
}
