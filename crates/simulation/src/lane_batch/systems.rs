use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::baseline::{Baselines, PathwayBaseline};
use crate::components::{
    CarLane, Deleted, Edge, Overridden, Owner, PathwayAuthoring, PathwayData, PrefabRef, Road,
    Temp,
};
use crate::log_once::WarnOnce;
use crate::retune::{pathway_target, RetuneOutcome};
use crate::settings::TuningSettings;

use super::types::{LaneBatchScheduler, LaneVisit};

type Live = (Without<Deleted>, Without<Temp>);
type PathEdge = (
    With<Edge>,
    Without<Road>,
    Without<Overridden>,
    Without<Deleted>,
    Without<Temp>,
);

/// Lookups from a lane to the path prototype that drives its speed.
#[derive(SystemParam)]
pub struct PathLaneLookups<'w, 's> {
    edges: Query<'w, 's, &'static PrefabRef, PathEdge>,
    path_prototypes: Query<'w, 's, Option<&'static PathwayAuthoring>, With<PathwayData>>,
}

impl PathLaneLookups<'_, '_> {
    /// Path prototype behind a lane's owning edge, if the edge is a path.
    pub fn path_prototype(&self, owner: &Owner) -> Option<Entity> {
        let edge = owner.get()?;
        let prefab = self.edges.get(edge).ok()?;
        self.path_prototypes.contains(prefab.0).then_some(prefab.0)
    }

    fn authored(&self, prototype: Entity) -> Option<PathwayBaseline> {
        self.path_prototypes
            .get(prototype)
            .ok()
            .flatten()
            .and_then(PathwayBaseline::from_authoring)
    }
}

/// Snapshot path lanes and start a run when the applied path scalar differs
/// from the last run's, or a forced run is pending.
pub fn begin_lane_batch(
    mut scheduler: ResMut<LaneBatchScheduler>,
    outcome: Res<RetuneOutcome>,
    settings: Res<TuningSettings>,
    lanes: Query<(Entity, &Owner), (With<CarLane>, Without<Deleted>, Without<Temp>)>,
    lookups: PathLaneLookups,
) {
    // Lanes follow what the prototypes received.
    if outcome.passes == 0 {
        return;
    }
    let scalar = outcome.applied.path_speed;
    let started = scheduler.begin_if_needed(scalar, || {
        lanes
            .iter()
            .filter(|(_, owner)| lookups.path_prototype(owner).is_some())
            .map(|(lane, _)| lane)
            .collect()
    });

    if started && settings.verbose_logging {
        let total = scheduler.progress().map_or(0, |(_, total)| total);
        info!(
            "Lane batch: run {} started, {} path lanes at {:.2}x",
            scheduler.stats.runs_started, total, scalar
        );
    }
}

/// Drain one chunk of the active run.
pub fn continue_lane_batch(
    mut scheduler: ResMut<LaneBatchScheduler>,
    mut baselines: ResMut<Baselines>,
    mut warnings: ResMut<WarnOnce>,
    settings: Res<TuningSettings>,
    mut lanes: Query<(&Owner, &mut CarLane), Live>,
    lookups: PathLaneLookups,
) {
    let before = scheduler.stats.runs_completed;

    scheduler.continue_batch(|lane, scalar, cache| {
        let Ok((owner, mut car_lane)) = lanes.get_mut(lane) else {
            return LaneVisit::Skipped;
        };
        let Some(prototype) = lookups.path_prototype(owner) else {
            return LaneVisit::Skipped;
        };

        let desired = cache.get_or_compute(prototype, || {
            let baseline = baselines
                .pathways
                .capture(prototype, || lookups.authored(prototype))?;
            match pathway_target(prototype, &baseline, scalar) {
                Ok(speed) if speed > 0.0 => Some(speed),
                Ok(_) => None,
                Err(err) => {
                    warnings.warn(&err.cause_key(), || format!("Lane batch: {err}"));
                    None
                }
            }
        });
        let Some(desired) = desired else {
            return LaneVisit::Skipped;
        };

        let target = CarLane {
            speed_limit: desired,
            default_speed_limit: desired,
        };
        if car_lane.set_if_neq(target) {
            LaneVisit::Written
        } else {
            LaneVisit::Unchanged
        }
    });

    if settings.verbose_logging && scheduler.stats.runs_completed > before {
        let stats = &scheduler.stats;
        info!(
            "Lane batch: run complete, {} written, {} unchanged, {} skipped",
            stats.lanes_written, stats.lanes_unchanged, stats.lanes_skipped
        );
    }
}

pub fn lane_batch_active(scheduler: Res<LaneBatchScheduler>) -> bool {
    scheduler.is_active()
}
