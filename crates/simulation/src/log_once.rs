//! Warn-once logging keyed by cause.
//!
//! Faults that repeat every trigger (bad settings, a broken prototype) would
//! otherwise flood the log. Each distinct key is logged the first time only.

use bevy::prelude::*;
use std::collections::HashSet;

#[derive(Resource, Debug, Default)]
pub struct WarnOnce {
    seen: HashSet<String>,
}

impl WarnOnce {
    /// Log `message` at warn level unless `key` was already reported.
    /// Returns `true` when the message was emitted.
    pub fn warn(&mut self, key: &str, message: impl FnOnce() -> String) -> bool {
        if self.seen.contains(key) {
            return false;
        }
        self.seen.insert(key.to_string());
        warn!("{}", message());
        true
    }

    pub fn was_reported(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn reported_count(&self) -> usize {
        self.seen.len()
    }
}
