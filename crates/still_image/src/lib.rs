use bevy::prelude::*;

pub mod camera_db;
pub mod config;
pub mod errors;
pub mod feed;
pub mod image_selector;
pub mod protocol;
pub mod synthetic_feed;
pub mod transport;

pub use camera_db::{CameraConfig, CameraStatus, CctvDirection, DisplayOutcome, StillImageDb};
pub use errors::{ConfigError, RemoteDisplayError, SelectorError, ToggleError};
pub use feed::{CameraFeedQueue, DisplayOutcomeLog, FeedEvent};
pub use image_selector::{
    DisplayState, EndpointId, ImageSelector, IncidentImage, SharedImageSelector, SpeedRange,
};
pub use synthetic_feed::SyntheticSpeedFeed;
pub use transport::{DirectoryTransport, DisplayTransport, LoggingTransport, RecordingTransport};

/// Everything a simulator app needs to drive CCTV still images from a
/// traffic feed.
pub struct StillImagePlugin;

impl Plugin for StillImagePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(feed::CameraFeedPlugin);
    }
}
