//! JSON schema of the still-image camera configuration.
//!
//! ```json
//! { "cameras": [ { "id": 12, "display_id": 3, "direction": "N",
//!     "ranges":    [ { "min_speed": 0, "max_speed": 30, "image": "slow" } ],
//!     "incidents": [ { "incident": 7, "image": "crash7" } ] } ] }
//! ```

use serde::{Deserialize, Serialize};

use super::types::{CameraKey, CctvDirection};
use crate::errors::ConfigError;
use crate::image_selector::{EndpointId, IncidentImage, SpeedRange};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub cameras: Vec<CameraEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraEntry {
    /// Simulator-side CCTV id that speed samples and incidents refer to.
    pub id: u32,
    /// Display endpoint handed to the transport.
    pub display_id: EndpointId,
    pub direction: CctvDirection,
    /// Scanned in order; the first matching range wins.
    #[serde(default)]
    pub ranges: Vec<RangeEntry>,
    #[serde(default)]
    pub incidents: Vec<IncidentEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeEntry {
    pub min_speed: f32,
    pub max_speed: f32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentEntry {
    pub incident: u32,
    pub image: String,
}

impl CameraConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl CameraEntry {
    pub fn key(&self) -> CameraKey {
        CameraKey::new(self.id, self.direction)
    }

    pub fn speed_ranges(&self) -> Result<Vec<SpeedRange>, ConfigError> {
        self.ranges
            .iter()
            .map(|r| SpeedRange::new(r.min_speed, r.max_speed, r.image.clone()))
            .collect()
    }

    pub fn incident_images(&self) -> Vec<IncidentImage> {
        self.incidents
            .iter()
            .map(|i| IncidentImage::new(i.incident, i.image.clone()))
            .collect()
    }
}
