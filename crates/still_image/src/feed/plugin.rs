//! Plugin that wires up the camera feed: queue, executor, and outcome log.

use bevy::prelude::*;

use super::executor::process_camera_feed;
use super::outcome_log::DisplayOutcomeLog;
use super::queue::CameraFeedQueue;
use crate::camera_db::StillImageDb;

/// Registers the feed queue, outcome log, an empty [`StillImageDb`] and the
/// executor system. Drivers replace the database with
/// `app.insert_resource(db)` once the camera configuration is loaded.
pub struct CameraFeedPlugin;

impl Plugin for CameraFeedPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraFeedQueue>()
            .init_resource::<DisplayOutcomeLog>()
            .init_resource::<StillImageDb>()
            .add_systems(Update, process_camera_feed);
    }
}
