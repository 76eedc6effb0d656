use crate::types::LocationInfo;

use serde::{Deserialize, Serialize};

/// Capabilities that must be declared in the handshake before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JsApi {
    /// Read a local image as base64.
    GetLocalImgData,
    /// Pick images from album or camera.
    ChooseImage,
    /// Upload a local image.
    UploadImage,
    /// Show a location on the host map.
    OpenLocation,
    /// Read the device location.
    GetLocation,
    /// Begin a recording segment.
    StartRecord,
    /// Finish the current recording segment.
    StopRecord,
    /// Host-side auto-stop of a segment at its time limit.
    OnVoiceRecordEnd,
    /// Upload a recorded segment.
    UploadVoice,
    /// Play a recorded segment.
    PlayVoice,
    /// Stop playback.
    StopVoice,
    /// Playback reached the end.
    OnVoicePlayEnd,
}

impl JsApi {
    /// Every capability the bridge uses, in declaration order.
    pub const ALL: [JsApi; 12] = [
        JsApi::GetLocalImgData,
        JsApi::ChooseImage,
        JsApi::UploadImage,
        JsApi::OpenLocation,
        JsApi::GetLocation,
        JsApi::StartRecord,
        JsApi::StopRecord,
        JsApi::OnVoiceRecordEnd,
        JsApi::UploadVoice,
        JsApi::PlayVoice,
        JsApi::StopVoice,
        JsApi::OnVoicePlayEnd,
    ];

    /// Name of the capability as the host spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            JsApi::GetLocalImgData => "getLocalImgData",
            JsApi::ChooseImage => "chooseImage",
            JsApi::UploadImage => "uploadImage",
            JsApi::OpenLocation => "openLocation",
            JsApi::GetLocation => "getLocation",
            JsApi::StartRecord => "startRecord",
            JsApi::StopRecord => "stopRecord",
            JsApi::OnVoiceRecordEnd => "onVoiceRecordEnd",
            JsApi::UploadVoice => "uploadVoice",
            JsApi::PlayVoice => "playVoice",
            JsApi::StopVoice => "stopVoice",
            JsApi::OnVoicePlayEnd => "onVoicePlayEnd",
        }
    }
}

/// Payload of the host configuration entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRequest {
    /// Required by the host for invoke-style capabilities. Always `true`.
    pub beta: bool,
    /// Host echoes every call result when set.
    pub debug: bool,
    /// Corporate/application id.
    pub app_id: String,
    /// Signature timestamp.
    pub timestamp: String,
    /// Signature nonce.
    pub nonce_str: String,
    /// Signature over the page URL.
    pub signature: String,
    /// Capabilities this page is going to call.
    pub js_api_list: Vec<JsApi>,
}

/// Image size preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeType {
    /// Full-size image.
    Original,
    /// Host-compressed image.
    Compressed,
}

/// Coordinate system for location reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordType {
    /// GPS coordinates.
    Wgs84,
    /// Coordinates usable by the host's map view.
    Gcj02,
}

/// Image selection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChooseImageRequest {
    /// Maximum number of images to pick.
    pub count: u32,
    /// Accepted sizes.
    pub size_type: Vec<SizeType>,
}

impl ChooseImageRequest {
    /// Selection of up to `count` images, original size only.
    pub fn original(count: u32) -> Self {
        Self {
            count,
            size_type: vec![SizeType::Original],
        }
    }
}

/// Upload request shared by images and voice segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Local identifier to upload.
    pub local_id: String,
    /// `1` shows the host progress overlay, `0` hides it.
    pub is_show_progress_tips: u8,
}

impl UploadRequest {
    /// Upload without the host progress overlay.
    pub fn quiet(local_id: impl Into<String>) -> Self {
        Self {
            local_id: local_id.into(),
            is_show_progress_tips: 0,
        }
    }
}

/// Location read request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GetLocationRequest {
    /// Coordinate system of the reply.
    #[serde(rename = "type")]
    pub coord_type: CoordType,
}

impl Default for GetLocationRequest {
    fn default() -> Self {
        Self {
            coord_type: CoordType::Gcj02,
        }
    }
}

/// Map view request; the location fields are spread onto the payload.
pub type OpenLocationRequest = LocationInfo;
