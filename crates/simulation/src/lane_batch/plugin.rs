use bevy::prelude::*;

use crate::retune::reapply_prototypes;
use crate::SimulationSet;

use super::systems::{begin_lane_batch, continue_lane_batch, lane_batch_active};
use super::types::LaneBatchScheduler;

pub struct LaneBatchPlugin;

impl Plugin for LaneBatchPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LaneBatchScheduler>().add_systems(
            FixedUpdate,
            (
                begin_lane_batch.after(reapply_prototypes),
                continue_lane_batch.run_if(lane_batch_active),
            )
                .chain()
                .in_set(SimulationSet::Simulation),
        );
    }
}
