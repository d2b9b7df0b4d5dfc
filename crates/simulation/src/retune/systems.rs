use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::baseline::{Baselines, PathwayBaseline, VehicleBaseline};
use crate::components::{
    BicycleData, CarData, Deleted, PathwayAuthoring, PathwayComposition, PathwayData, PrefabData,
    PrefabRef, SwayingData, Temp, VehicleAuthoring,
};
use crate::log_once::WarnOnce;
use crate::settings::{EffectiveScalars, TuningSettings};

use super::error::RetuneError;
use super::targets::{pass_sway, pathway_target, vehicle_targets};
use super::types::{RetuneMode, RetuneOutcome, RetuneSchedule};

pub const SETTINGS_NON_FINITE_KEY: &str = "settings-non-finite";

type LivePrototype = (With<PrefabData>, Without<Deleted>, Without<Temp>);
type LightVehiclePrototype = (
    With<PrefabData>,
    With<BicycleData>,
    Without<Deleted>,
    Without<Temp>,
);

/// Every prototype-level record that carries retunable data.
#[derive(SystemParam)]
pub struct RetuneTargets<'w, 's> {
    vehicles: Query<
        'w,
        's,
        (Entity, Option<&'static VehicleAuthoring>, &'static mut CarData),
        LightVehiclePrototype,
    >,
    sway: Query<'w, 's, (Entity, &'static mut SwayingData), LightVehiclePrototype>,
    pathways: Query<
        'w,
        's,
        (Entity, Option<&'static PathwayAuthoring>, &'static mut PathwayData),
        LivePrototype,
    >,
    compositions: Query<
        'w,
        's,
        (Entity, &'static PrefabRef, &'static mut PathwayComposition),
        (Without<Deleted>, Without<Temp>),
    >,
    pathway_authoring: Query<'w, 's, &'static PathwayAuthoring>,
}

/// Writes computed by one pass, committed only once planning succeeds.
#[derive(Debug, Default)]
struct RetunePlan {
    vehicles: Vec<(Entity, CarData)>,
    sway: Vec<(Entity, SwayingData)>,
    pathways: Vec<(Entity, f32)>,
    compositions: Vec<(Entity, f32)>,
    visited: usize,
    skipped: usize,
}

impl RetuneTargets<'_, '_> {
    fn plan(
        &self,
        baselines: &mut Baselines,
        scalars: &EffectiveScalars,
        restore: bool,
    ) -> Result<RetunePlan, RetuneError> {
        let mut plan = RetunePlan::default();

        for (prototype, authoring, _) in self.vehicles.iter() {
            plan.visited += 1;
            let Some(baseline) = baselines
                .vehicles
                .capture(prototype, || authoring.copied().map(VehicleBaseline::from))
            else {
                plan.skipped += 1;
                continue;
            };
            plan.vehicles
                .push((prototype, vehicle_targets(prototype, &baseline, scalars)?));
        }

        for (prototype, current) in self.sway.iter() {
            plan.visited += 1;
            if let Some(baseline) = baselines.sway.capture(prototype, || Some(*current)) {
                plan.sway
                    .push((prototype, pass_sway(prototype, &baseline, scalars, restore)?));
            }
        }

        for (prototype, authoring, _) in self.pathways.iter() {
            plan.visited += 1;
            let Some(baseline) = baselines.pathways.capture(prototype, || {
                authoring.and_then(PathwayBaseline::from_authoring)
            }) else {
                plan.skipped += 1;
                continue;
            };
            plan.pathways.push((
                prototype,
                pathway_target(prototype, &baseline, scalars.path_speed)?,
            ));
        }

        for (composition, prefab, _) in self.compositions.iter() {
            plan.visited += 1;
            let prototype = prefab.0;
            let Some(baseline) = baselines.pathways.capture(prototype, || {
                self.pathway_authoring
                    .get(prototype)
                    .ok()
                    .and_then(PathwayBaseline::from_authoring)
            }) else {
                plan.skipped += 1;
                continue;
            };
            plan.compositions.push((
                composition,
                pathway_target(prototype, &baseline, scalars.path_speed)?,
            ));
        }

        Ok(plan)
    }

    /// Apply a plan, writing only fields that differ. Returns records changed.
    fn commit(&mut self, plan: &RetunePlan) -> usize {
        let mut updated = 0;

        for &(entity, target) in &plan.vehicles {
            if let Ok((_, _, mut car)) = self.vehicles.get_mut(entity) {
                if car.set_if_neq(target) {
                    updated += 1;
                }
            }
        }
        for &(entity, target) in &plan.sway {
            if let Ok((_, mut sway)) = self.sway.get_mut(entity) {
                if sway.set_if_neq(target) {
                    updated += 1;
                }
            }
        }
        for &(entity, speed_limit) in &plan.pathways {
            if let Ok((_, _, mut data)) = self.pathways.get_mut(entity) {
                if data.set_if_neq(PathwayData { speed_limit }) {
                    updated += 1;
                }
            }
        }
        for &(entity, speed_limit) in &plan.compositions {
            if let Ok((_, _, mut comp)) = self.compositions.get_mut(entity) {
                if comp.set_if_neq(PathwayComposition { speed_limit }) {
                    updated += 1;
                }
            }
        }

        updated
    }
}

pub fn retune_pending(schedule: Res<RetuneSchedule>) -> bool {
    schedule.is_pending()
}

/// One-shot pass over all prototypes. Consumes the pending request; a fault
/// aborts the pass before any write and is reported once per cause.
pub fn reapply_prototypes(
    mut schedule: ResMut<RetuneSchedule>,
    settings: Res<TuningSettings>,
    mut baselines: ResMut<Baselines>,
    mut warnings: ResMut<WarnOnce>,
    mut outcome: ResMut<RetuneOutcome>,
    mut targets: RetuneTargets,
) {
    let Some(mode) = schedule.take() else {
        return;
    };

    if settings.has_non_finite() {
        warnings.warn(SETTINGS_NON_FINITE_KEY, || {
            "Retune: non-finite scalar in settings, treating it as 1.0".to_string()
        });
    }

    let scalars = match mode {
        RetuneMode::Apply => settings.effective(),
        RetuneMode::RestoreBaseline => EffectiveScalars::NEUTRAL,
    };
    let restore = mode == RetuneMode::RestoreBaseline || !settings.enabled;

    let plan = match targets.plan(&mut baselines, &scalars, restore) {
        Ok(plan) => plan,
        Err(err) => {
            warnings.warn(&err.cause_key(), || format!("Retune: pass aborted, {err}"));
            outcome.mode = Some(mode);
            outcome.error = Some(err);
            return;
        }
    };
    let updated = targets.commit(&plan);

    *outcome = RetuneOutcome {
        passes: outcome.passes + 1,
        mode: Some(mode),
        applied: scalars,
        restored: restore,
        visited: plan.visited,
        updated,
        skipped: plan.skipped,
        error: None,
    };

    if settings.verbose_logging {
        info!(
            "Retune: {:?} speed={:.2}x stiffness={:.2}x damping={:.2}x path={:.2}x, \
             {} visited, {} updated, {} skipped",
            mode,
            scalars.speed,
            scalars.stiffness,
            scalars.damping,
            scalars.path_speed,
            plan.visited,
            updated,
            plan.skipped
        );
    }
}
