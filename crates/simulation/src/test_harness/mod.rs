//! # TestWorld: headless integration test harness
//!
//! Wraps `bevy::app::App` + `FastBikesPlugin` with deterministic stepping:
//! fixed ticks run the `FixedUpdate` schedule directly and status polls run
//! `Update` with a hand-driven frame counter and real clock.

mod queries;
mod spawning;

use bevy::app::App;
use bevy::core::FrameCount;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use std::time::Duration;

use crate::requests::TuningRequest;
use crate::session::SessionState;
use crate::settings::TuningSettings;
use crate::FastBikesPlugin;

pub struct TestWorld {
    app: App,
}

impl TestWorld {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Default settings, no city loaded.
    pub fn new() -> Self {
        Self::with_settings(TuningSettings::default())
    }

    pub fn with_settings(settings: TuningSettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        // Inserted before the plugin so init_resource keeps it.
        app.insert_resource(settings);
        app.add_plugins(FastBikesPlugin);

        // First update runs Startup and initializes the clocks.
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    pub fn enter_city(&mut self) {
        self.set_session(SessionState::InCity);
    }

    pub fn leave_city(&mut self) {
        self.set_session(SessionState::MainMenu);
    }

    fn set_session(&mut self, state: SessionState) {
        self.app
            .world_mut()
            .resource_mut::<NextState<SessionState>>()
            .set(state);
        self.app.world_mut().run_schedule(StateTransition);
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Run `n` fixed ticks.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Tick until the lane batch is idle, at most `limit` ticks. Returns the
    /// ticks taken.
    pub fn tick_until_lanes_idle(&mut self, limit: u32) -> u32 {
        for n in 0..limit {
            if !self.lane_batch().is_active() {
                return n;
            }
            self.tick(1);
        }
        limit
    }

    /// Start a new UI frame: bump the frame counter and advance the real
    /// clock by `elapsed`.
    pub fn next_frame(&mut self, elapsed: Duration) {
        let world = self.app.world_mut();
        let mut frame = world.resource_mut::<FrameCount>();
        frame.0 = frame.0.wrapping_add(1);
        world.resource_mut::<Time<Real>>().update_with_duration(elapsed);
    }

    /// Run the `Update` schedule once (one status poll within the current frame).
    pub fn poll_status(&mut self) {
        self.app.world_mut().run_schedule(Update);
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    pub fn send(&mut self, request: TuningRequest) {
        self.app.world_mut().send_event(request);
    }

    pub fn settings_mut(&mut self) -> Mut<'_, TuningSettings> {
        self.app.world_mut().resource_mut::<TuningSettings>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}
