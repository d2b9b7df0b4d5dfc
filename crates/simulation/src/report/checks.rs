//! Prototype sanity checks: live values against what a pass should have
//! written.

use bevy::prelude::*;

use crate::baseline::{PathwayBaseline, SwayBaseline, VehicleBaseline};
use crate::census::{format_entities, is_scooter_name, ReportDetail};
use crate::components::{CarData, PathwayAuthoring, SwayingData, VehicleAuthoring};
use crate::config::{
    ACCEL_MISMATCH_PCT, BRAKE_MISMATCH_PCT, COMPOSITION_ABS_MISMATCH_MS,
    EXPECTED_LIGHT_VEHICLE_NAMES, MAX_MISMATCH_EXAMPLES, PATH_MISMATCH_PCT, SPEED_MISMATCH_PCT,
    SWAY_AMPLITUDE_MISMATCH_PCT, SWAY_DAMPING_MISMATCH_PCT,
};
use crate::retune::{pass_sway, pathway_target, vehicle_targets};
use crate::settings::EffectiveScalars;
use crate::units::{ms_to_kmh, relative_diff, relative_diff_max};

/// One light-vehicle prototype as read from the world.
pub struct LightPrototypeView<'a> {
    pub entity: Entity,
    pub name: &'a str,
    pub authoring: Option<&'a VehicleAuthoring>,
    pub car: Option<&'a CarData>,
    pub sway: Option<&'a SwayingData>,
    /// Sway snapshot, if a pass captured one. Without it there is nothing to
    /// compare the live spring against.
    pub sway_baseline: Option<SwayBaseline>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MismatchCounts {
    pub any: usize,
    pub speed: usize,
    pub acceleration: usize,
    pub braking: usize,
    pub sway_amplitude: usize,
    pub sway_damping: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightPrototypeSummary {
    pub total: usize,
    pub bikes: usize,
    pub scooters: usize,
    pub group_names: Vec<String>,
    pub missing_expected: Vec<String>,
    pub extra_names: Vec<String>,
    pub missing_authoring: usize,
    pub missing_car_data: usize,
    pub missing_sway: usize,
    pub mismatches: MismatchCounts,
    pub examples: Vec<String>,
}

#[derive(Default)]
struct Mismatch {
    speed: bool,
    acceleration: bool,
    braking: bool,
    sway_amplitude: bool,
    sway_damping: bool,
}

impl Mismatch {
    fn any(&self) -> bool {
        self.speed || self.acceleration || self.braking || self.sway_amplitude || self.sway_damping
    }
}

/// `scalars` and `restored` describe the pass the live values should match.
pub fn summarize_light_prototypes<'a>(
    prototypes: impl IntoIterator<Item = LightPrototypeView<'a>>,
    scalars: &EffectiveScalars,
    restored: bool,
    detail: ReportDetail,
) -> LightPrototypeSummary {
    let mut summary = LightPrototypeSummary::default();

    for view in prototypes {
        summary.total += 1;
        if !summary
            .group_names
            .iter()
            .any(|n| n.eq_ignore_ascii_case(view.name))
        {
            summary.group_names.push(view.name.to_string());
        }
        if is_scooter_name(view.name) {
            summary.scooters += 1;
        } else {
            summary.bikes += 1;
        }

        let mut mismatch = Mismatch::default();
        let mut expected_car = None;

        if view.authoring.is_none() {
            summary.missing_authoring += 1;
        }
        if view.car.is_none() {
            summary.missing_car_data += 1;
        }
        if let (Some(authoring), Some(car)) = (view.authoring, view.car) {
            let baseline = VehicleBaseline::from(*authoring);
            match vehicle_targets(view.entity, &baseline, scalars) {
                Ok(expected) => {
                    mismatch.speed =
                        relative_diff(expected.max_speed, car.max_speed) > SPEED_MISMATCH_PCT;
                    mismatch.acceleration =
                        relative_diff(expected.acceleration, car.acceleration) > ACCEL_MISMATCH_PCT;
                    mismatch.braking =
                        relative_diff(expected.braking, car.braking) > BRAKE_MISMATCH_PCT;
                    expected_car = Some(expected);
                }
                Err(_) => mismatch.speed = true,
            }
        }

        match (view.sway, view.sway_baseline) {
            (None, _) => summary.missing_sway += 1,
            (Some(_), None) => {}
            (Some(live), Some(baseline)) => {
                match pass_sway(view.entity, &baseline, scalars, restored) {
                    Ok(expected) => {
                        mismatch.sway_amplitude =
                            relative_diff_max(expected.max_position, live.max_position)
                                > SWAY_AMPLITUDE_MISMATCH_PCT;
                        mismatch.sway_damping =
                            relative_diff_max(expected.damping_factors, live.damping_factors)
                                > SWAY_DAMPING_MISMATCH_PCT;
                    }
                    Err(_) => mismatch.sway_amplitude = true,
                }
            }
        }

        if !mismatch.any() {
            continue;
        }
        let counts = &mut summary.mismatches;
        counts.any += 1;
        counts.speed += usize::from(mismatch.speed);
        counts.acceleration += usize::from(mismatch.acceleration);
        counts.braking += usize::from(mismatch.braking);
        counts.sway_amplitude += usize::from(mismatch.sway_amplitude);
        counts.sway_damping += usize::from(mismatch.sway_damping);

        if detail == ReportDetail::Samples && summary.examples.len() < MAX_MISMATCH_EXAMPLES {
            summary
                .examples
                .push(mismatch_example(&view, expected_car.as_ref(), &mismatch));
        }
    }

    summary.missing_expected = EXPECTED_LIGHT_VEHICLE_NAMES
        .iter()
        .filter(|expected| {
            !summary
                .group_names
                .iter()
                .any(|n| n.eq_ignore_ascii_case(expected))
        })
        .map(|s| s.to_string())
        .collect();
    summary.extra_names = summary
        .group_names
        .iter()
        .filter(|n| {
            !EXPECTED_LIGHT_VEHICLE_NAMES
                .iter()
                .any(|expected| n.eq_ignore_ascii_case(expected))
        })
        .cloned()
        .collect();

    summary
}

fn mismatch_example(
    view: &LightPrototypeView<'_>,
    expected: Option<&CarData>,
    m: &Mismatch,
) -> String {
    let mut fields = Vec::new();
    if m.speed {
        fields.push("speed");
    }
    if m.acceleration {
        fields.push("accel");
    }
    if m.braking {
        fields.push("brake");
    }
    if m.sway_amplitude {
        fields.push("sway-amplitude");
    }
    if m.sway_damping {
        fields.push("sway-damping");
    }
    let mut line = format!(
        "{} ({}) [{}]",
        view.name,
        format_entities([view.entity]),
        fields.join(", ")
    );
    if let (Some(expected), Some(car)) = (expected, view.car) {
        line.push_str(&format!(
            " max speed {:.1} km/h, expected {:.1} km/h",
            ms_to_kmh(car.max_speed),
            ms_to_kmh(expected.max_speed)
        ));
    }
    line
}

// ---------------------------------------------------------------------------
// Path speeds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpeedRange {
    pub min_ms: f32,
    pub max_ms: f32,
}

impl SpeedRange {
    fn widen(range: &mut Option<SpeedRange>, ms: f32) {
        *range = Some(match *range {
            None => SpeedRange { min_ms: ms, max_ms: ms },
            Some(r) => SpeedRange {
                min_ms: r.min_ms.min(ms),
                max_ms: r.max_ms.max(ms),
            },
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSummary {
    pub prototypes: usize,
    pub prototype_range: Option<SpeedRange>,
    pub missing_authoring: usize,
    pub invalid_authoring: usize,
    pub prototype_mismatch: usize,
    pub compositions: usize,
    pub composition_range: Option<SpeedRange>,
    pub composition_missing_pathway: usize,
    pub composition_mismatch: usize,
}

/// `prototypes`: live path speed and authoring per path prototype.
/// `compositions`: composition speed and its prototype's live path speed.
pub fn summarize_paths(
    prototypes: impl IntoIterator<Item = (Entity, f32, Option<PathwayAuthoring>)>,
    compositions: impl IntoIterator<Item = (f32, Option<f32>)>,
    path_scalar: f32,
) -> PathSummary {
    let mut summary = PathSummary::default();

    for (entity, current_ms, authoring) in prototypes {
        summary.prototypes += 1;
        SpeedRange::widen(&mut summary.prototype_range, current_ms);

        let Some(authoring) = authoring else {
            summary.missing_authoring += 1;
            continue;
        };
        let Some(baseline) = PathwayBaseline::from_authoring(&authoring) else {
            summary.invalid_authoring += 1;
            continue;
        };
        let mismatched = match pathway_target(entity, &baseline, path_scalar) {
            Ok(expected) => relative_diff(expected, current_ms) > PATH_MISMATCH_PCT,
            Err(_) => true,
        };
        if mismatched {
            summary.prototype_mismatch += 1;
        }
    }

    for (current_ms, desired_ms) in compositions {
        summary.compositions += 1;
        SpeedRange::widen(&mut summary.composition_range, current_ms);
        match desired_ms {
            None => summary.composition_missing_pathway += 1,
            Some(desired) if (current_ms - desired).abs() > COMPOSITION_ABS_MISMATCH_MS => {
                summary.composition_mismatch += 1;
            }
            Some(_) => {}
        }
    }

    summary
}
