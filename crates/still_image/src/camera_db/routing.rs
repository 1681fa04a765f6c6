//! Routing of camera feed data to the right selectors.
//!
//! Speed samples arrive per camera with one average speed for each travel
//! direction; incidents arrive per camera display. Failures never escape
//! from here: they are logged and reported as [`DisplayOutcome`]s so one bad
//! display cannot stall the feed for the others.

use bevy::prelude::*;
use serde::Serialize;

use super::db::StillImageDb;
use super::types::CctvDirection;
use crate::errors::SelectorError;
use crate::image_selector::{DisplayState, EndpointId};

/// What happened on a display as the result of one feed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DisplayOutcome {
    /// A new range image committed and was pushed to the display.
    Shown {
        cctv_id: u32,
        direction: CctvDirection,
        image_id: String,
    },
    /// An incident toggle was applied; `showing` is what should now be visible.
    IncidentToggled {
        cctv_id: u32,
        direction: CctvDirection,
        incident_id: u32,
        start: bool,
        showing: Option<String>,
    },
    /// The stop toggle did not match the active incident.
    ToggleRejected {
        cctv_id: u32,
        direction: CctvDirection,
        incident_id: u32,
    },
    /// The transport failed to swap the image.
    DisplayFailed {
        cctv_id: u32,
        direction: CctvDirection,
        message: String,
    },
    /// No display is configured for this camera (and direction, if given).
    UnknownCamera {
        cctv_id: u32,
        direction: Option<CctvDirection>,
    },
}

impl DisplayOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DisplayOutcome::ToggleRejected { .. }
                | DisplayOutcome::DisplayFailed { .. }
                | DisplayOutcome::UnknownCamera { .. }
        )
    }
}

/// Snapshot of one camera display for status queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraStatus {
    pub cctv_id: u32,
    pub direction: CctvDirection,
    pub display_id: EndpointId,
    pub state: DisplayState,
    pub image: Option<String>,
    pub active_incident: Option<u32>,
}

impl StillImageDb {
    /// Feed the average speeds measured at a camera to each of its displays.
    ///
    /// North/east displays use `speed_ne`, south/west displays use
    /// `speed_sw`. Only displays whose image changed produce an outcome.
    pub fn update_camera_info(
        &mut self,
        cctv_id: u32,
        speed_ne: f32,
        speed_sw: f32,
    ) -> Vec<DisplayOutcome> {
        let directions = self.directions_for(cctv_id);
        if directions.is_empty() {
            return vec![DisplayOutcome::UnknownCamera {
                cctv_id,
                direction: None,
            }];
        }

        let mut outcomes = Vec::new();
        for direction in directions {
            let Some(selector) = self.get_mut(cctv_id, direction) else {
                continue;
            };
            let speed = if direction.follows_north_east() {
                speed_ne
            } else {
                speed_sw
            };
            if !selector.update_speed(speed) {
                continue;
            }

            match selector.show_current_image() {
                Ok(()) => outcomes.push(DisplayOutcome::Shown {
                    cctv_id,
                    direction,
                    image_id: selector.current_image().unwrap_or_default().to_owned(),
                }),
                Err(e) => {
                    warn!(
                        "CCTV {cctv_id} {}: failed to show new speed image: {e}",
                        direction.letter()
                    );
                    outcomes.push(DisplayOutcome::DisplayFailed {
                        cctv_id,
                        direction,
                        message: e.to_string(),
                    });
                }
            }
        }
        outcomes
    }

    /// Start or stop an incident override on one camera display.
    pub fn trigger_incident(
        &mut self,
        cctv_id: u32,
        direction: CctvDirection,
        incident_id: u32,
        start: bool,
    ) -> DisplayOutcome {
        let Some(selector) = self.get_mut(cctv_id, direction) else {
            warn!(
                "CCTV {cctv_id} {}: no display configured for incident #{incident_id}",
                direction.letter()
            );
            return DisplayOutcome::UnknownCamera {
                cctv_id,
                direction: Some(direction),
            };
        };

        match selector.toggle_incident(incident_id, start) {
            Ok(()) => DisplayOutcome::IncidentToggled {
                cctv_id,
                direction,
                incident_id,
                start,
                showing: selector.current_image().map(str::to_owned),
            },
            Err(SelectorError::Toggle(e)) => {
                warn!("CCTV {cctv_id} {}: {e}", direction.letter());
                DisplayOutcome::ToggleRejected {
                    cctv_id,
                    direction,
                    incident_id,
                }
            }
            Err(SelectorError::Display(e)) => {
                warn!(
                    "CCTV {cctv_id} {}: failed to show incident #{incident_id}: {e}",
                    direction.letter()
                );
                DisplayOutcome::DisplayFailed {
                    cctv_id,
                    direction,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Status of every display configured for `cctv_id`.
    pub fn status(&self, cctv_id: u32) -> Vec<CameraStatus> {
        self.iter()
            .filter(|(key, _)| key.cctv_id == cctv_id)
            .map(|(key, selector)| CameraStatus {
                cctv_id: key.cctv_id,
                direction: key.direction,
                display_id: selector.endpoint_id(),
                state: selector.state(),
                image: selector.current_image().map(str::to_owned),
                active_incident: selector
                    .active_incident()
                    .filter(|_| selector.is_showing_incident())
                    .map(|i| i.incident_id()),
            })
            .collect()
    }
}
