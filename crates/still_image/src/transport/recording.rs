//! In-memory transport that records every successful display request.
//! Used by tests and by drivers that only need to observe decisions.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::DisplayTransport;
use crate::errors::RemoteDisplayError;
use crate::image_selector::EndpointId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownImage {
    pub endpoint_id: EndpointId,
    pub image_id: String,
}

#[derive(Debug, Default)]
pub struct RecordingTransport {
    shown: Mutex<Vec<ShownImage>>,
    failing_images: Mutex<HashSet<String>>,
    failures: Mutex<u32>,
}

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every request for `image_id` fail with `RemoteDisplayError::Rejected`.
    pub fn fail_on(&self, image_id: impl Into<String>) {
        guard(&self.failing_images).insert(image_id.into());
    }

    /// Stop failing requests for `image_id`.
    pub fn recover(&self, image_id: &str) {
        guard(&self.failing_images).remove(image_id);
    }

    pub fn shown(&self) -> Vec<ShownImage> {
        guard(&self.shown).clone()
    }

    /// Image ids shown so far, in order.
    pub fn shown_images(&self) -> Vec<String> {
        guard(&self.shown)
            .iter()
            .map(|shown| shown.image_id.clone())
            .collect()
    }

    pub fn last_shown(&self) -> Option<ShownImage> {
        guard(&self.shown).last().cloned()
    }

    /// Number of requests rejected through `fail_on`.
    pub fn failure_count(&self) -> u32 {
        *guard(&self.failures)
    }

    pub fn clear(&self) {
        guard(&self.shown).clear();
    }
}

impl DisplayTransport for RecordingTransport {
    fn show_image(&self, endpoint_id: EndpointId, image_id: &str) -> Result<(), RemoteDisplayError> {
        if guard(&self.failing_images).contains(image_id) {
            *guard(&self.failures) += 1;
            return Err(RemoteDisplayError::Rejected(format!(
                "display {endpoint_id} could not show {image_id}"
            )));
        }
        guard(&self.shown).push(ShownImage {
            endpoint_id,
            image_id: image_id.to_owned(),
        });
        Ok(())
    }
}
