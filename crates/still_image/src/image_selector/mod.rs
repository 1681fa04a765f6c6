//! Speed/incident driven still-image selection for one display endpoint.
//!
//! States:
//! - `NoImage`: no range image committed and no incident active.
//! - `ShowingRange`: the debounced speed-derived image is on screen.
//! - `ShowingIncident`: an incident image overrides the range image.

pub mod selector;
pub mod shared;
pub mod types;


pub use selector::{Dispatch, ImageSelector};
pub use shared::SharedImageSelector;
pub use types::{DisplayState, EndpointId, IncidentImage, SpeedRange};
