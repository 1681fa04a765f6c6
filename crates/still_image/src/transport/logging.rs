use bevy::prelude::*;

use super::DisplayTransport;
use crate::errors::RemoteDisplayError;
use crate::image_selector::EndpointId;

/// Transport that only logs the requested swap. Stands in for the display
/// host when no image directory is mounted.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTransport;

impl DisplayTransport for LoggingTransport {
    fn show_image(&self, endpoint_id: EndpointId, image_id: &str) -> Result<(), RemoteDisplayError> {
        info!("Showing display {endpoint_id}, with image: {image_id}");
        Ok(())
    }
}
