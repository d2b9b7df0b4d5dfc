use bevy::prelude::*;

use crate::baseline::Baselines;
use crate::SimulationSet;

use super::systems::{reapply_prototypes, retune_pending};
use super::types::{RetuneOutcome, RetuneSchedule};

pub struct RetunePlugin;

impl Plugin for RetunePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Baselines>()
            .init_resource::<RetuneSchedule>()
            .init_resource::<RetuneOutcome>()
            .add_systems(
                FixedUpdate,
                reapply_prototypes
                    .run_if(retune_pending)
                    .in_set(SimulationSet::Simulation),
            );
    }
}
