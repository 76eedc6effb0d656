use serde::{Deserialize, Serialize};

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude, -90 to 90.
    pub latitude: f64,
    /// Longitude, -180 to 180.
    pub longitude: f64,
}

/// A location to open in the host's map view.
///
/// Serialized flat: the coordinates sit next to the optional fields,
/// which is how the host expects the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    /// Coordinates of the place.
    #[serde(flatten)]
    pub location: Location,
    /// Place name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Address details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Map zoom level, 1 to 28. The host defaults to 16.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u8>,
}

impl LocationInfo {
    /// A bare location with no name, address, or zoom.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            location: Location {
                latitude,
                longitude,
            },
            name: None,
            address: None,
            scale: None,
        }
    }
}

/// One selected image and its local data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    /// Host-assigned local identifier.
    pub local_id: String,
    /// Base64 image data as returned by the host.
    pub data: String,
}

/// A local asset paired with its identifier on the host's media server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadInfo {
    /// Local identifier that was uploaded.
    pub local_id: String,
    /// Server-side media id.
    pub server_id: String,
}

/// One completed recording segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Zero-based position of the segment within its session.
    pub index: u32,
    /// Host-assigned local identifier of the recorded audio.
    pub local_id: String,
}
