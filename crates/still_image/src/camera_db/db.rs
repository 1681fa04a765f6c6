use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use bevy::prelude::*;

use super::config_file::CameraConfig;
use super::types::{CameraKey, CctvDirection};
use crate::errors::ConfigError;
use crate::image_selector::ImageSelector;
use crate::transport::DisplayTransport;

/// Every camera display's selector, keyed by CCTV id and direction.
///
/// Lives in the ECS world as a resource so the feed executor has exclusive
/// access while it routes events.
#[derive(Resource, Debug, Default)]
pub struct StillImageDb {
    selectors: BTreeMap<CameraKey, ImageSelector>,
}

impl StillImageDb {
    /// Build one selector per camera entry, all sharing `transport`.
    pub fn from_config(
        config: &CameraConfig,
        transport: Arc<dyn DisplayTransport>,
    ) -> Result<Self, ConfigError> {
        let mut db = Self::default();
        for entry in &config.cameras {
            let mut selector = ImageSelector::new(entry.display_id, Arc::clone(&transport));
            for range in entry.speed_ranges()? {
                selector.add_range(range);
            }
            for incident in entry.incident_images() {
                selector.add_incident(incident);
            }
            db.insert(entry.key(), selector)?;
        }
        Ok(db)
    }

    pub fn from_json_str(
        json: &str,
        transport: Arc<dyn DisplayTransport>,
    ) -> Result<Self, ConfigError> {
        let config = CameraConfig::from_json_str(json)?;
        Self::from_config(&config, transport)
    }

    pub fn load_from_path(
        path: impl AsRef<Path>,
        transport: Arc<dyn DisplayTransport>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let db = Self::from_json_str(&json, transport)?;
        info!(
            "Loaded {} camera displays from {}",
            db.len(),
            path.display()
        );
        Ok(db)
    }

    /// Register a selector. A camera id + direction pair may only be used once.
    pub fn insert(&mut self, key: CameraKey, selector: ImageSelector) -> Result<(), ConfigError> {
        if self.selectors.contains_key(&key) {
            return Err(ConfigError::DuplicateCamera {
                cctv_id: key.cctv_id,
                direction: key.direction,
            });
        }
        self.selectors.insert(key, selector);
        Ok(())
    }

    pub fn get(&self, cctv_id: u32, direction: CctvDirection) -> Option<&ImageSelector> {
        self.selectors.get(&CameraKey::new(cctv_id, direction))
    }

    pub fn get_mut(
        &mut self,
        cctv_id: u32,
        direction: CctvDirection,
    ) -> Option<&mut ImageSelector> {
        self.selectors.get_mut(&CameraKey::new(cctv_id, direction))
    }

    /// Directions configured for a camera, in N, S, E, W order.
    pub fn directions_for(&self, cctv_id: u32) -> Vec<CctvDirection> {
        CctvDirection::ALL
            .into_iter()
            .filter(|&direction| {
                self.selectors
                    .contains_key(&CameraKey::new(cctv_id, direction))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CameraKey, &ImageSelector)> {
        self.selectors.iter()
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}
