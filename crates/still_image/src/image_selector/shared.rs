//! Thread-safe handle around one [`ImageSelector`].
//!
//! Each handle owns its own mutex, so drivers feeding different endpoints
//! from different threads never contend. Transport calls are made after the
//! lock is released: a slow display host delays only the caller that
//! triggered the swap, not other updates to the same endpoint.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::selector::{Dispatch, ImageSelector};
use super::types::DisplayState;
use crate::errors::{RemoteDisplayError, SelectorError};

#[derive(Debug, Clone)]
pub struct SharedImageSelector {
    inner: Arc<Mutex<ImageSelector>>,
}

impl SharedImageSelector {
    pub fn new(selector: ImageSelector) -> Self {
        Self {
            inner: Arc::new(Mutex::new(selector)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ImageSelector> {
        // Selector methods never panic mid-update.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Feed a speed sample and show the new range image if it committed.
    ///
    /// Returns whether an image was dispatched.
    pub fn update_speed(&self, speed: f32) -> Result<bool, RemoteDisplayError> {
        let dispatch = {
            let mut selector = self.lock();
            if selector.update_speed(speed) {
                selector.pending_dispatch()
            } else {
                None
            }
        };
        match dispatch {
            Some(dispatch) => dispatch.send().map(|()| true),
            None => Ok(false),
        }
    }

    /// Start or stop an incident override. State changes are applied under
    /// the lock; the resulting display requests are then sent in order,
    /// stopping at the first transport failure.
    pub fn toggle_incident(&self, incident_id: u32, start: bool) -> Result<(), SelectorError> {
        let dispatches = self.lock().plan_toggle(incident_id, start)?;
        send_all(&dispatches)?;
        Ok(())
    }

    pub fn show_current_image(&self) -> Result<(), RemoteDisplayError> {
        let dispatch = self.lock().pending_dispatch();
        match dispatch {
            Some(dispatch) => dispatch.send(),
            None => Ok(()),
        }
    }

    pub fn state(&self) -> DisplayState {
        self.lock().state()
    }

    pub fn current_image(&self) -> Option<String> {
        self.lock().current_image().map(str::to_owned)
    }

    /// Run `f` with exclusive access to the selector, e.g. for setup.
    pub fn with_selector<R>(&self, f: impl FnOnce(&mut ImageSelector) -> R) -> R {
        f(&mut self.lock())
    }
}

fn send_all(dispatches: &[Dispatch]) -> Result<(), RemoteDisplayError> {
    dispatches.iter().try_for_each(Dispatch::send)
}
