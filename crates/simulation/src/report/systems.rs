use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::baseline::Baselines;
use crate::census::{CensusScan, ReportDetail};
use crate::components::{
    BicycleData, CarData, Deleted, PathwayAuthoring, PathwayComposition, PathwayData, PrefabData,
    PrefabRef, SwayingData, Temp, VehicleAuthoring,
};
use crate::lane_batch::LaneBatchScheduler;
use crate::retune::RetuneOutcome;
use crate::settings::TuningSettings;

use super::checks::{summarize_light_prototypes, summarize_paths, LightPrototypeView};
use super::text::{build_report, ReportInput};
use super::types::DiagnosticReport;

type Live = (Without<Deleted>, Without<Temp>);

type LightPrototypeItem = (
    Entity,
    &'static PrefabData,
    Option<&'static VehicleAuthoring>,
    Option<&'static CarData>,
    Option<&'static SwayingData>,
);

/// Prototype-level reads for the sanity sections.
#[derive(SystemParam)]
pub struct ReportSources<'w, 's> {
    light_prototypes: Query<'w, 's, LightPrototypeItem, (With<BicycleData>, Live)>,
    path_prototypes: Query<
        'w,
        's,
        (Entity, &'static PathwayData, Option<&'static PathwayAuthoring>),
        (With<PrefabData>, Live),
    >,
    compositions: Query<'w, 's, (&'static PathwayComposition, &'static PrefabRef), Live>,
    pathway_data: Query<'w, 's, &'static PathwayData>,
}

pub fn report_pending(report: Res<DiagnosticReport>) -> bool {
    report.is_pending()
}

pub fn generate_report(
    mut report: ResMut<DiagnosticReport>,
    settings: Res<TuningSettings>,
    outcome: Res<RetuneOutcome>,
    baselines: Res<Baselines>,
    lanes: Res<LaneBatchScheduler>,
    sources: ReportSources,
    scan: CensusScan,
) {
    let detail = ReportDetail::from_verbose(settings.verbose_logging);
    let effective = settings.effective();
    // Live values follow the last completed pass, not settings edited since.
    let (expected, restored) = if outcome.passes > 0 {
        (outcome.applied, outcome.restored)
    } else {
        (effective, !settings.enabled)
    };

    let prototypes = summarize_light_prototypes(
        sources
            .light_prototypes
            .iter()
            .map(|(entity, prefab, authoring, car, sway)| LightPrototypeView {
                entity,
                name: &prefab.name,
                authoring,
                car,
                sway,
                sway_baseline: baselines.sway.get(entity),
            }),
        &expected,
        restored,
        detail,
    );

    let paths = summarize_paths(
        sources
            .path_prototypes
            .iter()
            .map(|(entity, data, authoring)| (entity, data.speed_limit, authoring.copied())),
        sources.compositions.iter().map(|(comp, prefab)| {
            let desired = sources.pathway_data.get(prefab.0).ok().map(|d| d.speed_limit);
            (comp.speed_limit, desired)
        }),
        expected.path_speed,
    );

    let census = scan.take(detail);
    let text = build_report(&ReportInput {
        settings: &settings,
        effective,
        lane_progress: lanes.progress(),
        prototypes: &prototypes,
        paths: &paths,
        census: &census,
        detail,
    });

    info!("Report: diagnostic report\n{text}");
    if !census.border.is_consistent() {
        warn!(
            "Report: border buckets do not add up ({} != {})",
            census.border.partition_total(),
            census.border.examined
        );
    }
    report.store(text);
}
