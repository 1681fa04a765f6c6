//! Feed executor system: drains the [`CameraFeedQueue`] each update and
//! routes every [`FeedEvent`] to the still-image database, recording the
//! resulting outcomes in the [`DisplayOutcomeLog`].

use bevy::prelude::*;

use super::outcome_log::DisplayOutcomeLog;
use super::queue::{CameraFeedQueue, FeedEvent};
use crate::camera_db::{DisplayOutcome, StillImageDb};

/// Drains all pending feed events and applies them in arrival order.
pub fn process_camera_feed(
    mut queue: ResMut<CameraFeedQueue>,
    mut db: ResMut<StillImageDb>,
    mut log: ResMut<DisplayOutcomeLog>,
) {
    for event in queue.drain() {
        for outcome in apply_feed_event(&mut db, &event) {
            log.push(outcome);
        }
    }
}

/// Route a single feed event, returning what happened on the displays.
pub fn apply_feed_event(db: &mut StillImageDb, event: &FeedEvent) -> Vec<DisplayOutcome> {
    match *event {
        FeedEvent::Speed {
            cctv_id,
            speed_ne,
            speed_sw,
        } => db.update_camera_info(cctv_id, speed_ne, speed_sw),
        FeedEvent::Incident {
            cctv_id,
            direction,
            incident_id,
            start,
        } => vec![db.trigger_incident(cctv_id, direction, incident_id, start)],
    }
}
