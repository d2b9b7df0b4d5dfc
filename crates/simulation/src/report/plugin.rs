use bevy::prelude::*;

use crate::SimulationSet;

use super::systems::{generate_report, report_pending};
use super::types::DiagnosticReport;

pub struct ReportPlugin;

impl Plugin for ReportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DiagnosticReport>().add_systems(
            FixedUpdate,
            generate_report
                .run_if(report_pending)
                .in_set(SimulationSet::PostSim),
        );
    }
}
