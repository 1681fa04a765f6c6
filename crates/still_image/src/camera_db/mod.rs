//! Still-image database: the selectors for every configured camera display,
//! built from the JSON camera configuration, plus routing of speed samples
//! and incident toggles to them.

pub mod config_file;
pub mod db;
pub mod routing;
pub mod types;


pub use config_file::{CameraConfig, CameraEntry, IncidentEntry, RangeEntry};
pub use db::StillImageDb;
pub use routing::{CameraStatus, DisplayOutcome};
pub use types::{CameraKey, CctvDirection};
