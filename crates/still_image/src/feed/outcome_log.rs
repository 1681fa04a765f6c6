//! Ring-buffer log of recent display outcomes.
//!
//! The [`DisplayOutcomeLog`] resource keeps the last
//! [`OUTCOME_LOG_CAPACITY`] outcomes produced by the feed executor, giving
//! drivers and operators a way to see what the displays did without
//! inspecting every selector.

use bevy::prelude::*;

use crate::camera_db::DisplayOutcome;
use crate::config::OUTCOME_LOG_CAPACITY;

#[derive(Resource, Debug, Clone, Default)]
pub struct DisplayOutcomeLog {
    entries: Vec<DisplayOutcome>,
    /// Outcomes ever recorded, including evicted ones.
    recorded: u64,
}

impl DisplayOutcomeLog {
    /// Record an outcome, evicting the oldest entry when full.
    pub fn push(&mut self, outcome: DisplayOutcome) {
        if self.entries.len() >= OUTCOME_LOG_CAPACITY {
            self.entries.remove(0);
        }
        self.entries.push(outcome);
        self.recorded += 1;
    }

    /// Return the last `n` entries (or fewer if the log is shorter).
    pub fn last_n(&self, n: usize) -> &[DisplayOutcome] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Entries recorded after the log had seen `recorded` outcomes, limited
    /// to what is still retained.
    pub fn since(&self, recorded: u64) -> &[DisplayOutcome] {
        let new = self.recorded.saturating_sub(recorded);
        self.last_n(usize::try_from(new).unwrap_or(usize::MAX))
    }

    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn failures(&self) -> impl Iterator<Item = &DisplayOutcome> {
        self.entries.iter().filter(|outcome| outcome.is_failure())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
