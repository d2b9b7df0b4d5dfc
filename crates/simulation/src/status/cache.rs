use bevy::prelude::*;
use std::fmt;
use std::time::Duration;

use super::templates::{NO_CITY_HEAVY, NO_CITY_LIGHT, PLACEHOLDER_TEXT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRows {
    pub light: String,
    pub heavy: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    Placeholder,
    NoCity,
    Rows(StatusRows),
}

/// What a poll did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// Same poll frame as the previous call.
    Deduplicated,
    /// Nothing due.
    Unchanged,
    Computed,
    Failed(String),
}

/// Throttled, per-frame-deduplicated status rows.
///
/// Polls may arrive several times per drawn frame; only the first one in a
/// frame does any work. Inside a session the first poll computes immediately
/// and later ones recompute once `interval` has elapsed or after
/// [`StatusCache::mark_dirty`].
#[derive(Resource, Debug)]
pub struct StatusCache {
    view: StatusView,
    last_poll_frame: Option<u32>,
    last_computed_at: Option<Duration>,
    in_session: bool,
    dirty: bool,
    computations: u64,
    failures: u64,
}

impl Default for StatusCache {
    fn default() -> Self {
        Self {
            view: StatusView::Placeholder,
            last_poll_frame: None,
            last_computed_at: None,
            in_session: false,
            dirty: false,
            computations: 0,
            failures: 0,
        }
    }
}

impl StatusCache {
    pub fn refresh_if_needed<E: fmt::Display>(
        &mut self,
        frame: u32,
        now: Duration,
        in_session: bool,
        interval: Duration,
        compute: impl FnOnce() -> Result<StatusRows, E>,
    ) -> Refresh {
        if self.last_poll_frame == Some(frame) {
            return Refresh::Deduplicated;
        }
        self.last_poll_frame = Some(frame);

        if in_session != self.in_session {
            self.in_session = in_session;
            self.invalidate();
        }
        if !in_session {
            self.view = StatusView::NoCity;
            return Refresh::Unchanged;
        }

        let due = match self.last_computed_at {
            None => true,
            Some(at) => self.dirty || now.saturating_sub(at) >= interval,
        };
        if !due {
            return Refresh::Unchanged;
        }

        self.last_computed_at = Some(now);
        self.dirty = false;
        self.computations += 1;
        match compute() {
            Ok(rows) => {
                self.view = StatusView::Rows(rows);
                Refresh::Computed
            }
            Err(e) => {
                self.failures += 1;
                self.view = StatusView::Placeholder;
                Refresh::Failed(e.to_string())
            }
        }
    }

    /// Drop the snapshot and show the placeholder until the next poll.
    pub fn invalidate(&mut self) {
        self.view = StatusView::Placeholder;
        self.last_computed_at = None;
        self.dirty = false;
    }

    /// Recompute on the next poll, keeping the current rows until then.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn view(&self) -> &StatusView {
        &self.view
    }

    /// The two display lines.
    pub fn lines(&self) -> (&str, &str) {
        match &self.view {
            StatusView::Placeholder => (PLACEHOLDER_TEXT, PLACEHOLDER_TEXT),
            StatusView::NoCity => (NO_CITY_LIGHT, NO_CITY_HEAVY),
            StatusView::Rows(rows) => (rows.light.as_str(), rows.heavy.as_str()),
        }
    }

    pub fn computations(&self) -> u64 {
        self.computations
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }
}
