//! Display transports: the seam between image selection and whatever
//! actually swaps the picture on a display host.

pub mod directory;
pub mod logging;
pub mod recording;

pub use directory::DirectoryTransport;
pub use logging::LoggingTransport;
pub use recording::{RecordingTransport, ShownImage};

use crate::errors::RemoteDisplayError;
use crate::image_selector::EndpointId;

/// Performs the display swap for an endpoint.
///
/// Implementations may block on I/O. Selectors never retry or cache on
/// failure; errors are handed back to whoever asked for the swap.
pub trait DisplayTransport: Send + Sync {
    fn show_image(&self, endpoint_id: EndpointId, image_id: &str) -> Result<(), RemoteDisplayError>;
}
