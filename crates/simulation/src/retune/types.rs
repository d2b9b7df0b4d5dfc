use bevy::prelude::*;

use crate::settings::EffectiveScalars;

use super::error::RetuneError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetuneMode {
    /// Baseline times the configured scalars.
    Apply,
    /// Baseline values, whatever the configuration says.
    RestoreBaseline,
}

/// Pending one-shot pass. The pass runs on the next fixed tick and the
/// request is consumed; nothing runs while no request is pending.
#[derive(Resource, Debug, Default)]
pub struct RetuneSchedule {
    pending: Option<RetuneMode>,
}

impl RetuneSchedule {
    /// Queue a pass. A later request replaces an earlier one.
    pub fn request(&mut self, mode: RetuneMode) {
        self.pending = Some(mode);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn take(&mut self) -> Option<RetuneMode> {
        self.pending.take()
    }
}

/// Result of the most recent retuning pass.
#[derive(Resource, Debug, Clone, Default)]
pub struct RetuneOutcome {
    /// Completed passes this session, aborted ones excluded.
    pub passes: u32,
    pub mode: Option<RetuneMode>,
    /// Scalars written by the last completed pass.
    pub applied: EffectiveScalars,
    /// The last completed pass put baselines back (restore request or
    /// disabled settings).
    pub restored: bool,
    pub visited: usize,
    pub updated: usize,
    /// Prototypes with no baseline-eligible data.
    pub skipped: usize,
    pub error: Option<RetuneError>,
}
