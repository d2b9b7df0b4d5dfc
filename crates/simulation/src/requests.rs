//! External triggers: explicit requests from a settings panel or console, and
//! settings edits picked up through change detection.

use bevy::prelude::*;

use crate::report::DiagnosticReport;
use crate::retune::{RetuneMode, RetuneSchedule};
use crate::settings::TuningSettings;
use crate::status::StatusCache;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningRequest {
    /// Retune from baselines with the current settings.
    Apply,
    /// Put every retuned value back to its baseline.
    RestoreBaseline,
    /// Produce a diagnostic report on the next tick.
    DiagnosticReport,
}

pub fn route_tuning_requests(
    mut requests: EventReader<TuningRequest>,
    mut schedule: ResMut<RetuneSchedule>,
    mut report: ResMut<DiagnosticReport>,
) {
    for request in requests.read() {
        match request {
            TuningRequest::Apply => schedule.request(RetuneMode::Apply),
            TuningRequest::RestoreBaseline => schedule.request(RetuneMode::RestoreBaseline),
            TuningRequest::DiagnosticReport => report.request(),
        }
    }
}

/// Any edit to [`TuningSettings`] queues a pass and refreshes the status rows.
pub fn queue_pass_on_settings_change(
    settings: Res<TuningSettings>,
    mut schedule: ResMut<RetuneSchedule>,
    mut status: ResMut<StatusCache>,
) {
    if settings.is_changed() && !settings.is_added() {
        schedule.request(RetuneMode::Apply);
        status.mark_dirty();
    }
}
