use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Identifier of a remote display slot (the ATMS-side camera index).
pub type EndpointId = u32;

/// A half-open speed interval `[min_speed, max_speed)` mapped to an image.
///
/// Ranges held by a selector are scanned in insertion order and the first
/// match wins, so overlapping ranges must be configured in priority order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedRange {
    min_speed: f32,
    max_speed: f32,
    image_id: String,
}

impl SpeedRange {
    /// Rejects `min_speed > max_speed` and NaN bounds.
    pub fn new(
        min_speed: f32,
        max_speed: f32,
        image_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if min_speed.is_nan() || max_speed.is_nan() || min_speed > max_speed {
            return Err(ConfigError::InvalidRange {
                min: min_speed,
                max: max_speed,
            });
        }
        Ok(Self {
            min_speed,
            max_speed,
            image_id: image_id.into(),
        })
    }

    /// `true` when `min_speed <= speed < max_speed`.
    pub fn contains(&self, speed: f32) -> bool {
        speed >= self.min_speed && speed < self.max_speed
    }

    pub fn min_speed(&self) -> f32 {
        self.min_speed
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn image_id(&self) -> &str {
        &self.image_id
    }
}

/// Image shown while an incident overrides the speed-derived image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentImage {
    incident_id: u32,
    image_id: String,
}

impl IncidentImage {
    pub fn new(incident_id: u32, image_id: impl Into<String>) -> Self {
        Self {
            incident_id,
            image_id: image_id.into(),
        }
    }

    pub fn incident_id(&self) -> u32 {
        self.incident_id
    }

    pub fn image_id(&self) -> &str {
        &self.image_id
    }
}

/// Coarse view of what a selector is putting on its display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    NoImage,
    ShowingRange,
    ShowingIncident,
}
