use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera_db::CctvDirection;

/// One message from the traffic simulation feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FeedEvent {
    /// Average speeds measured at a camera, one per travel direction.
    Speed {
        cctv_id: u32,
        speed_ne: f32,
        speed_sw: f32,
    },
    /// An incident starting (`start == true`) or ending in view of a camera.
    Incident {
        cctv_id: u32,
        direction: CctvDirection,
        incident_id: u32,
        start: bool,
    },
}

/// FIFO of feed events waiting for the next executor run.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct CameraFeedQueue {
    pending: Vec<FeedEvent>,
}

impl CameraFeedQueue {
    pub fn push(&mut self, event: FeedEvent) {
        self.pending.push(event);
    }

    pub fn push_speed(&mut self, cctv_id: u32, speed_ne: f32, speed_sw: f32) {
        self.push(FeedEvent::Speed {
            cctv_id,
            speed_ne,
            speed_sw,
        });
    }

    pub fn push_incident(
        &mut self,
        cctv_id: u32,
        direction: CctvDirection,
        incident_id: u32,
        start: bool,
    ) {
        self.push(FeedEvent::Incident {
            cctv_id,
            direction,
            incident_id,
            start,
        });
    }

    pub fn drain(&mut self) -> Vec<FeedEvent> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
