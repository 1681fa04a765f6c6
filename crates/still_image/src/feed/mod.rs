pub mod executor;
pub mod outcome_log;
pub mod plugin;
pub mod queue;

pub use executor::{apply_feed_event, process_camera_feed};
pub use outcome_log::DisplayOutcomeLog;
pub use plugin::CameraFeedPlugin;
pub use queue::{CameraFeedQueue, FeedEvent};
