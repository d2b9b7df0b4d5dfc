//! Headless app construction and stepping shared by the batch run and
//! agent mode.

use bevy::core::FrameCount;
use bevy::ecs::system::SystemState;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use simulation::census::{CensusScan, ReportDetail, VehicleCensus};
use simulation::lane_batch::LaneBatchScheduler;
use simulation::report::DiagnosticReport;
use simulation::requests::TuningRequest;
use simulation::session::SessionState;
use simulation::settings::TuningSettings;
use simulation::status::StatusCache;
use simulation::FastBikesPlugin;

/// Upper bound on ticks spent waiting for a lane run to drain.
pub const MAX_DRAIN_TICKS: u32 = 100_000;

pub fn build_app(settings: TuningSettings) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, LogPlugin::default()));
    app.insert_resource(settings);
    app.add_plugins(FastBikesPlugin);

    // Initial update so Startup systems execute and resources initialize.
    app.update();
    app
}

pub fn set_session(app: &mut App, state: SessionState) {
    app.world_mut()
        .resource_mut::<NextState<SessionState>>()
        .set(state);
    app.world_mut().run_schedule(StateTransition);
}

pub fn tick(app: &mut App, n: u32) {
    for _ in 0..n {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Tick until no lane run is active. Returns the ticks taken.
pub fn drain_lanes(app: &mut App) -> u32 {
    let mut ticks = 0;
    while ticks < MAX_DRAIN_TICKS && app.world().resource::<LaneBatchScheduler>().is_active() {
        tick(app, 1);
        ticks += 1;
    }
    ticks
}

pub fn send(app: &mut App, request: TuningRequest) {
    app.world_mut().send_event(request);
}

/// Request a report and tick once so PostSim produces it.
pub fn report(app: &mut App) -> Option<String> {
    send(app, TuningRequest::DiagnosticReport);
    tick(app, 1);
    app.world()
        .resource::<DiagnosticReport>()
        .text()
        .map(str::to_string)
}

/// One forced status poll in a fresh frame.
pub fn status_lines(app: &mut App) -> (String, String) {
    let world = app.world_mut();
    let mut frame = world.resource_mut::<FrameCount>();
    frame.0 = frame.0.wrapping_add(1);
    world.resource_mut::<StatusCache>().mark_dirty();
    world.run_schedule(Update);

    let (light, heavy) = world.resource::<StatusCache>().lines();
    (light.to_string(), heavy.to_string())
}

pub fn census(app: &mut App, detail: ReportDetail) -> VehicleCensus {
    let mut state = SystemState::<CensusScan>::new(app.world_mut());
    state.get(app.world()).take(detail)
}
