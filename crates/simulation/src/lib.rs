use bevy::prelude::*;

pub mod baseline;
pub mod census;
pub mod components;
pub mod config;
pub mod lane_batch;
pub mod log_once;
pub mod report;
pub mod requests;
pub mod retune;
pub mod session;
pub mod settings;
pub mod simulation_sets;
pub mod status;
pub mod synthetic_city;
pub mod units;

#[cfg(test)]
pub(crate) mod test_harness;

pub use simulation_sets::SimulationSet;

use lane_batch::LaneBatchPlugin;
use log_once::WarnOnce;
use report::ReportPlugin;
use requests::{queue_pass_on_settings_change, route_tuning_requests, TuningRequest};
use retune::RetunePlugin;
use session::{SessionPlugin, SessionState};
use settings::TuningSettings;
use status::StatusPlugin;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Fixed ticks run while a city is loaded.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

/// Light-vehicle retuning, lane propagation, census, report and status.
///
/// Settings are taken from an existing [`TuningSettings`] resource if the host
/// inserted one before adding the plugin; otherwise defaults are used.
pub struct FastBikesPlugin;

impl Plugin for FastBikesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickCounter>()
            .init_resource::<TuningSettings>()
            .init_resource::<WarnOnce>()
            .add_event::<TuningRequest>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::PreSim,
                    SimulationSet::Simulation,
                    SimulationSet::PostSim,
                )
                    .chain()
                    .run_if(in_state(SessionState::InCity)),
            )
            .add_systems(
                FixedUpdate,
                (
                    tick_counter,
                    route_tuning_requests,
                    queue_pass_on_settings_change,
                )
                    .chain()
                    .in_set(SimulationSet::PreSim),
            );

        app.add_plugins((
            RetunePlugin,
            LaneBatchPlugin,
            ReportPlugin,
            StatusPlugin,
            SessionPlugin,
        ));
    }
}
