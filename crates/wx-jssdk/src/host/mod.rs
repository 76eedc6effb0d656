//! The host SDK seam.
//!
//! The host is a callback-driven capability provider embedded in the
//! webview. [`Host`] models each entry point as a future that resolves when
//! the host fires the completion callback for that call. Implementations
//! live outside this crate (a JS bridge, a test double).

mod request;

pub use request::{
    ChooseImageRequest, ConfigRequest, CoordType, GetLocationRequest, JsApi, OpenLocationRequest,
    SizeType, UploadRequest,
};

use crate::{CoreError, CoreResult, types::Location};

use std::panic::Location as CallerLocation;

use async_trait::async_trait;
use error_location::ErrorLocation;

/// Suffix that marks a successful host status, e.g. `chooseImage:ok`.
pub const HOST_OK_SUFFIX: &str = "ok";

/// Raw completion delivered by a host callback.
#[derive(Debug, Clone, PartialEq)]
pub struct HostReply<T> {
    /// Status string, e.g. `getLocation:ok` or `getLocation:fail auth deny`.
    pub err_msg: String,
    /// Payload, present on success.
    pub data: Option<T>,
}

impl<T> HostReply<T> {
    /// Successful completion carrying `data`.
    pub fn ok(err_msg: impl Into<String>, data: T) -> Self {
        Self {
            err_msg: err_msg.into(),
            data: Some(data),
        }
    }

    /// Failed completion with no payload.
    pub fn fail(err_msg: impl Into<String>) -> Self {
        Self {
            err_msg: err_msg.into(),
            data: None,
        }
    }

    /// Whether the status ends with the literal `ok`.
    ///
    /// Case-sensitive and anchored at the end. An empty status is a failure.
    pub fn is_ok(&self) -> bool {
        self.err_msg.ends_with(HOST_OK_SUFFIX)
    }

    /// Converts the completion into the operation's result.
    #[track_caller]
    pub fn into_result(self, operation: &'static str) -> CoreResult<T> {
        if !self.is_ok() {
            return Err(CoreError::HostCallFailed {
                operation,
                message: self.err_msg,
                location: ErrorLocation::from(CallerLocation::caller()),
            });
        }

        self.data.ok_or(CoreError::MalformedReply {
            operation,
            location: ErrorLocation::from(CallerLocation::caller()),
        })
    }
}

/// The two mutually exclusive outcomes of the configuration handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadySignal {
    /// Host fired its ready callback.
    Ready,
    /// Host fired its error callback with this message.
    Error(String),
}

/// Capability provider embedded in the webview.
///
/// Every method issues exactly one host call and resolves with that call's
/// completion. The host has no cancellation primitive: dropping a returned
/// future only stops waiting for the callback.
#[async_trait]
pub trait Host: Send + Sync {
    /// Submit the configuration handshake and wait for ready or error.
    async fn config(&self, request: ConfigRequest) -> ReadySignal;

    /// Open the image picker. Yields the selected local ids.
    async fn choose_image(&self, request: ChooseImageRequest) -> HostReply<Vec<String>>;

    /// Read one local image as base64.
    async fn get_local_img_data(&self, local_id: &str) -> HostReply<String>;

    /// Upload a local image. Yields the server id.
    async fn upload_image(&self, request: UploadRequest) -> HostReply<String>;

    /// Show a location in the host map view.
    async fn open_location(&self, request: OpenLocationRequest) -> HostReply<()>;

    /// Read the device location.
    async fn get_location(&self, request: GetLocationRequest) -> HostReply<Location>;

    /// Begin a recording segment; resolves when the host confirms the start.
    ///
    /// Some devices never fire this callback, so callers must not rely on it
    /// resolving.
    async fn start_record(&self) -> HostReply<()>;

    /// Finish the current segment. Yields its local id.
    async fn stop_record(&self) -> HostReply<String>;

    /// Wait for the host to auto-stop the current segment at its time limit.
    /// Yields the segment's local id.
    async fn voice_record_end(&self) -> HostReply<String>;

    /// Upload a recorded segment. Yields the server id.
    async fn upload_voice(&self, request: UploadRequest) -> HostReply<String>;

    /// Start playback of a recorded segment.
    async fn play_voice(&self, local_id: &str) -> HostReply<()>;

    /// Stop playback of a recorded segment.
    async fn stop_voice(&self, local_id: &str) -> HostReply<()>;

    /// Wait for the next playback-ended event. Yields the id that finished.
    ///
    /// The host listener is global: the event may belong to any clip. The
    /// listener is registered when the future is first polled, and an
    /// implementation must buffer any event fired from then on until the
    /// future completes.
    async fn voice_play_end(&self) -> HostReply<String>;
}
