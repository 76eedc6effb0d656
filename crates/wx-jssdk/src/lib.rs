//! wx-jssdk
//!
//! Async bridge over a callback-based webview host SDK: image selection
//! and upload, location, and segmented voice recording and playback.
//!
//! The host is reached only through the [`Host`] trait. A one-time
//! readiness handshake gates every operation, and recording runs as a
//! single exclusive session that streams its segments.
//!
//! # Example
//!
//! ```no_run
//! use wx_jssdk::{CoreResult, Host, SdkConfig, WxSdk};
//!
//! use std::{sync::Arc, time::Duration};
//!
//! use futures::StreamExt;
//!
//! async fn record(host: Arc<dyn Host>) -> CoreResult<Vec<String>> {
//!     let sdk = WxSdk::with_static_credentials(host, SdkConfig::load()?)?;
//!
//!     let mut segments = sdk.start_recording(Duration::from_secs(60), 3).await?;
//!     let mut ids = Vec::new();
//!     while let Some(segment) = segments.next().await {
//!         ids.push(segment?.local_id);
//!     }
//!
//!     Ok(ids)
//! }
//! ```

mod config;
mod error;
mod host;
mod readiness;
mod recording;
mod sdk;
mod stream;
mod types;

pub use {
    config::{BridgeConfig, CredentialsConfig, MediaConfig, RecordingConfig, SdkConfig},
    error::{CoreError, Result as CoreResult},
    host::{
        ChooseImageRequest, ConfigRequest, CoordType, GetLocationRequest, HOST_OK_SUFFIX, Host,
        HostReply, JsApi, OpenLocationRequest, ReadySignal, SizeType, UploadRequest,
    },
    readiness::{ReadinessGate, ReadinessState, Signature, SignatureProvider},
    recording::{HOST_SEGMENT_LIMIT, MAX_SEGMENTS_WARN_THRESHOLD, RecordingStatus, SegmentStream},
    sdk::WxSdk,
    stream::OpStream,
    types::{ImageData, Location, LocationInfo, Segment, UploadInfo},
};

#[cfg(test)]
mod tests;
