//! City session lifecycle.
//!
//! Entering [`SessionState::InCity`] is the "world became ready" trigger:
//! prototypes of the new city are captured fresh and retuned, path lanes get a
//! forced propagation run, and the status rows are recomputed on next poll.
//! Leaving puts captured sway springs back, since sway is captured from the
//! live prototype and would otherwise be scaled again by the next session.

use bevy::prelude::*;

use crate::baseline::Baselines;
use crate::components::SwayingData;
use crate::lane_batch::LaneBatchScheduler;
use crate::retune::{RetuneMode, RetuneOutcome, RetuneSchedule};
use crate::status::StatusCache;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    MainMenu,
    /// A city is loaded and ticking.
    InCity,
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SessionState>()
            .add_systems(OnEnter(SessionState::InCity), on_city_ready)
            .add_systems(OnExit(SessionState::InCity), on_city_closed);
    }
}

fn on_city_ready(
    mut baselines: ResMut<Baselines>,
    mut outcome: ResMut<RetuneOutcome>,
    mut schedule: ResMut<RetuneSchedule>,
    mut lanes: ResMut<LaneBatchScheduler>,
    mut status: ResMut<StatusCache>,
) {
    baselines.clear();
    *outcome = RetuneOutcome::default();
    lanes.reset();
    schedule.request(RetuneMode::Apply);
    lanes.request_force();
    status.invalidate();
    info!("Retune: city ready, baselines cleared and pass queued");
}

fn on_city_closed(
    baselines: Res<Baselines>,
    mut sway: Query<&mut SwayingData>,
    mut status: ResMut<StatusCache>,
    mut lanes: ResMut<LaneBatchScheduler>,
) {
    let mut restored = 0usize;
    for (prototype, authored) in baselines.sway.iter() {
        if let Ok(mut current) = sway.get_mut(prototype) {
            if current.set_if_neq(authored) {
                restored += 1;
            }
        }
    }
    status.invalidate();
    lanes.reset();
    info!("Retune: city closed, {restored} sway springs restored");
}
