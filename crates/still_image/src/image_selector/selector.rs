//! Debounced image selection for a single display endpoint.
//!
//! An [`ImageSelector`] turns noisy speed samples into a stable
//! speed-derived image and lets incidents override that image until they are
//! explicitly stopped. Speed bookkeeping keeps running underneath an active
//! incident, so the display falls straight back to an up-to-date range image
//! when the override ends.

use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;

use super::types::{DisplayState, EndpointId, IncidentImage, SpeedRange};
use crate::config::DEBOUNCE_THRESHOLD;
use crate::errors::{RemoteDisplayError, SelectorError, ToggleError};
use crate::transport::DisplayTransport;

/// A resolved "show this image on that display" request, detached from the
/// selector so it can be sent after any lock on the selector is released.
pub struct Dispatch {
    transport: Arc<dyn DisplayTransport>,
    pub endpoint_id: EndpointId,
    pub image_id: String,
}

impl Dispatch {
    pub fn send(&self) -> Result<(), RemoteDisplayError> {
        self.transport.show_image(self.endpoint_id, &self.image_id)
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("endpoint_id", &self.endpoint_id)
            .field("image_id", &self.image_id)
            .finish_non_exhaustive()
    }
}

pub struct ImageSelector {
    endpoint_id: EndpointId,
    transport: Arc<dyn DisplayTransport>,
    ranges: Vec<SpeedRange>,
    incidents: Vec<IncidentImage>,
    /// Range image considered on screen, even while an incident hides it.
    current_range_image: Option<String>,
    /// Latest distinct candidate waiting for debounce confirmation.
    candidate_range_image: Option<String>,
    candidate_streak: u32,
    /// Last started incident. Kept after a stop so the same id can be
    /// stopped again.
    active_incident: Option<IncidentImage>,
    /// `true` while `active_incident` overrides the range image.
    showing_incident: bool,
}

impl ImageSelector {
    pub fn new(endpoint_id: EndpointId, transport: Arc<dyn DisplayTransport>) -> Self {
        Self {
            endpoint_id,
            transport,
            ranges: Vec::new(),
            incidents: Vec::new(),
            current_range_image: None,
            candidate_range_image: None,
            candidate_streak: 0,
            active_incident: None,
            showing_incident: false,
        }
    }

    pub fn add_range(&mut self, range: SpeedRange) {
        self.ranges.push(range);
    }

    pub fn add_incident(&mut self, incident: IncidentImage) {
        self.incidents.push(incident);
    }

    /// Feed a new speed sample.
    ///
    /// Returns `true` when the sample committed a new range image that should
    /// be shown now, i.e. the debounce threshold was reached and no incident
    /// is overriding the display.
    pub fn update_speed(&mut self, speed: f32) -> bool {
        let current = self.current_range_image.as_deref();
        let proposed = self
            .ranges
            .iter()
            .find(|range| range.contains(speed) && Some(range.image_id()) != current)
            .map(|range| range.image_id().to_owned());

        if let Some(image) = proposed {
            if self.candidate_range_image.as_deref() == Some(image.as_str()) {
                self.candidate_streak += 1;
            } else {
                // Nothing has been committed yet: the first sighting counts.
                self.candidate_streak = if self.current_range_image.is_none() {
                    1
                } else {
                    0
                };
                self.candidate_range_image = Some(image);
            }
        }

        let mut committed = false;
        if self.candidate_streak >= DEBOUNCE_THRESHOLD {
            self.candidate_streak = 0;
            self.current_range_image = self.candidate_range_image.clone();
            committed = true;
            debug!(
                "Display {}: range image is now {:?} (speed {speed})",
                self.endpoint_id, self.current_range_image
            );
        }

        committed && !self.is_showing_incident()
    }

    /// Start or stop the override for `incident_id`.
    ///
    /// Starting walks every registered entry for the id, showing each in turn,
    /// so with duplicate entries the transport is called once per entry and
    /// the last one stays active. Starting an id with no entries changes
    /// nothing. Stopping succeeds for the last started incident, even if it
    /// was already stopped, and fails for any other id.
    pub fn toggle_incident(&mut self, incident_id: u32, start: bool) -> Result<(), SelectorError> {
        if start {
            let matching: Vec<IncidentImage> = self
                .incidents
                .iter()
                .filter(|incident| incident.incident_id() == incident_id)
                .cloned()
                .collect();
            for incident in matching {
                debug!(
                    "Display {}: incident #{incident_id} overrides with {}",
                    self.endpoint_id,
                    incident.image_id()
                );
                self.active_incident = Some(incident);
                self.showing_incident = true;
                self.show_current_image()?;
            }
            return Ok(());
        }

        self.stop_incident(incident_id)?;
        debug!(
            "Display {}: incident #{incident_id} cleared, falling back to {:?}",
            self.endpoint_id, self.current_range_image
        );
        self.show_current_image()?;
        Ok(())
    }

    fn stop_incident(&mut self, incident_id: u32) -> Result<(), ToggleError> {
        match &self.active_incident {
            Some(active) if active.incident_id() == incident_id => {
                self.showing_incident = false;
                Ok(())
            }
            _ => Err(ToggleError {
                endpoint_id: self.endpoint_id,
                incident_id,
            }),
        }
    }

    /// Apply a toggle without calling the transport, returning the requests
    /// that `toggle_incident` would have sent, in order.
    pub(crate) fn plan_toggle(
        &mut self,
        incident_id: u32,
        start: bool,
    ) -> Result<Vec<Dispatch>, ToggleError> {
        if start {
            let mut dispatches = Vec::new();
            for incident in &self.incidents {
                if incident.incident_id() == incident_id {
                    self.active_incident = Some(incident.clone());
                    self.showing_incident = true;
                    dispatches.push(Dispatch {
                        transport: Arc::clone(&self.transport),
                        endpoint_id: self.endpoint_id,
                        image_id: incident.image_id().to_owned(),
                    });
                }
            }
            return Ok(dispatches);
        }

        self.stop_incident(incident_id)?;
        Ok(self.pending_dispatch().into_iter().collect())
    }

    /// Push the image that should currently be visible to the transport.
    /// Does nothing before the first range commit unless an incident is active.
    pub fn show_current_image(&self) -> Result<(), RemoteDisplayError> {
        match self.pending_dispatch() {
            Some(dispatch) => dispatch.send(),
            None => Ok(()),
        }
    }

    /// The request `show_current_image` would send, if any.
    pub fn pending_dispatch(&self) -> Option<Dispatch> {
        self.current_image().map(|image_id| Dispatch {
            transport: Arc::clone(&self.transport),
            endpoint_id: self.endpoint_id,
            image_id: image_id.to_owned(),
        })
    }

    /// Image that should be visible: the incident image during an override,
    /// otherwise the committed range image.
    pub fn current_image(&self) -> Option<&str> {
        match &self.active_incident {
            Some(incident) if self.showing_incident => Some(incident.image_id()),
            _ => self.current_range_image.as_deref(),
        }
    }

    pub fn state(&self) -> DisplayState {
        if self.is_showing_incident() {
            DisplayState::ShowingIncident
        } else if self.current_range_image.is_some() {
            DisplayState::ShowingRange
        } else {
            DisplayState::NoImage
        }
    }

    pub fn is_showing_incident(&self) -> bool {
        self.showing_incident
    }

    pub fn endpoint_id(&self) -> EndpointId {
        self.endpoint_id
    }

    pub fn current_range_image(&self) -> Option<&str> {
        self.current_range_image.as_deref()
    }

    pub fn candidate_range_image(&self) -> Option<&str> {
        self.candidate_range_image.as_deref()
    }

    pub fn candidate_streak(&self) -> u32 {
        self.candidate_streak
    }

    pub fn active_incident(&self) -> Option<&IncidentImage> {
        self.active_incident.as_ref()
    }

    pub fn ranges(&self) -> &[SpeedRange] {
        &self.ranges
    }

    pub fn incidents(&self) -> &[IncidentImage] {
        &self.incidents
    }
}

impl fmt::Debug for ImageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSelector")
            .field("endpoint_id", &self.endpoint_id)
            .field("ranges", &self.ranges)
            .field("incidents", &self.incidents)
            .field("current_range_image", &self.current_range_image)
            .field("candidate_range_image", &self.candidate_range_image)
            .field("candidate_streak", &self.candidate_streak)
            .field("active_incident", &self.active_incident)
            .field("showing_incident", &self.showing_incident)
            .finish_non_exhaustive()
    }
}
