//! Plain-text rendering of the diagnostic report.

use std::fmt::Write;

use crate::census::{HeadTailSamples, ReportDetail, VehicleCensus};
use crate::config::{COMPOSITION_ABS_MISMATCH_MS, MAX_MISMATCH_EXAMPLES, PATH_MISMATCH_PCT};
use crate::settings::{EffectiveScalars, TuningSettings};
use crate::units::{kmh_to_mph, ms_to_kmh};

use super::checks::{LightPrototypeSummary, PathSummary, SpeedRange};

/// Everything one report is rendered from.
pub struct ReportInput<'a> {
    pub settings: &'a TuningSettings,
    pub effective: EffectiveScalars,
    /// `(remaining, total)` while the lane batch is draining.
    pub lane_progress: Option<(usize, usize)>,
    pub prototypes: &'a LightPrototypeSummary,
    pub paths: &'a PathSummary,
    pub census: &'a VehicleCensus,
    pub detail: ReportDetail,
}

pub fn build_report(input: &ReportInput<'_>) -> String {
    let mut out = String::with_capacity(4096);
    scalar_section(&mut out, input);
    prototype_section(&mut out, input.prototypes, input.detail);
    path_section(&mut out, input.paths, input.effective.path_speed);
    light_section(&mut out, input.census);
    heavy_section(&mut out, input.census);
    border_section(&mut out, input.census);
    out
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n==================== {title} ====================");
}

fn scalar_section(out: &mut String, input: &ReportInput<'_>) {
    let s = input.settings;
    let e = &input.effective;
    header(out, "SCALAR SUMMARY");
    let _ = writeln!(out, "Enabled={}", s.enabled);
    let _ = writeln!(out, "Speed Scalar={:.2} (Effective={:.2})", s.speed_scalar, e.speed);
    let _ = writeln!(
        out,
        "Stiffness Scalar={:.2} (Effective={:.2})",
        s.stiffness_scalar, e.stiffness
    );
    let _ = writeln!(out, "Damping Scalar={:.2} (Effective={:.2})", s.damping_scalar, e.damping);
    let _ = writeln!(
        out,
        "Path Speed Scalar={:.2} (Effective={:.2})",
        s.path_speed_scalar, e.path_speed
    );
    match input.lane_progress {
        Some((remaining, total)) => {
            let _ = writeln!(out, "Path lane batch: RUNNING (LanesRemaining={remaining}/{total})");
        }
        None => {
            let _ = writeln!(out, "Path lane batch: IDLE (no queued work)");
        }
    }
}

fn prototype_section(out: &mut String, p: &LightPrototypeSummary, detail: ReportDetail) {
    header(out, "LIGHT VEHICLE PROTOTYPES");
    let _ = writeln!(
        out,
        "Total={} (Bicycles={}, Scooters={})",
        p.total, p.bikes, p.scooters
    );
    let _ = writeln!(out, "GroupNames={}", join_or_none(&p.group_names));
    if !p.missing_expected.is_empty() {
        let _ = writeln!(out, "WARNING MissingExpectedNames={}", p.missing_expected.join(", "));
    }
    if !p.extra_names.is_empty() {
        let _ = writeln!(out, "NOTE ExtraNames={}", p.extra_names.join(", "));
    }
    let _ = writeln!(
        out,
        "MissingAuthoring={}, MissingCarData={}, MissingSwayingData={}",
        p.missing_authoring, p.missing_car_data, p.missing_sway
    );
    let m = &p.mismatches;
    let _ = writeln!(
        out,
        "MismatchAny={} (Speed={}, Accel={}, Brake={}, SwayMaxPos={}, SwayDamping={})",
        m.any, m.speed, m.acceleration, m.braking, m.sway_amplitude, m.sway_damping
    );
    match detail {
        ReportDetail::Summary => {
            let _ = writeln!(out, "Mismatch details suppressed (counts only).");
        }
        ReportDetail::Samples => {
            let _ = writeln!(
                out,
                "MismatchExamples={}/{}",
                p.examples.len(),
                MAX_MISMATCH_EXAMPLES
            );
            for example in &p.examples {
                let _ = writeln!(out, "  {example}");
            }
        }
    }
}

fn path_section(out: &mut String, p: &PathSummary, path_scalar: f32) {
    header(out, "PATH SPEED SUMMARY");
    let _ = writeln!(out, "Path Scalar={path_scalar:.2}");
    let _ = writeln!(out, "Prototypes={}", p.prototypes);
    let _ = writeln!(out, "{}", range_line(p.prototype_range));
    let _ = writeln!(
        out,
        "MissingAuthoring={}, InvalidAuthoring={}",
        p.missing_authoring, p.invalid_authoring
    );
    let _ = writeln!(
        out,
        "Mismatch>{:.0}%={}",
        PATH_MISMATCH_PCT * 100.0,
        p.prototype_mismatch
    );
    let _ = writeln!(out, "Compositions={}", p.compositions);
    let _ = writeln!(out, "{}", range_line(p.composition_range));
    let _ = writeln!(out, "MissingPathwayDataOnPrototype={}", p.composition_missing_pathway);
    let _ = writeln!(
        out,
        "MismatchAbs>{COMPOSITION_ABS_MISMATCH_MS:.2} m/s={}",
        p.composition_mismatch
    );
}

fn range_line(range: Option<SpeedRange>) -> String {
    match range {
        None => "SpeedMin=n/a, SpeedMax=n/a".to_string(),
        Some(r) => {
            let (min, max) = (ms_to_kmh(r.min_ms), ms_to_kmh(r.max_ms));
            format!(
                "SpeedMin={min:.1} km/h ({:.1} mph), SpeedMax={max:.1} km/h ({:.1} mph)",
                kmh_to_mph(min),
                kmh_to_mph(max)
            )
        }
    }
}

fn light_section(out: &mut String, census: &VehicleCensus) {
    let l = &census.light;
    header(out, "LIGHT VEHICLE INSTANCES");
    let _ = writeln!(
        out,
        "Total={}, Active={}, Parked={}, Other={}",
        l.all_live, l.active, l.parked, l.pending
    );
    let _ = writeln!(
        out,
        "Bicycles: Active={}, Parked={} | Scooters: Active={}, Parked={}",
        l.bikes_active, l.bikes_parked, l.scooters_active, l.scooters_parked
    );
    let _ = writeln!(
        out,
        "Unspawned={} (Parked={})",
        l.unspawned, l.unspawned_parked
    );
}

fn heavy_section(out: &mut String, census: &VehicleCensus) {
    let h = &census.heavy;
    header(out, "HEAVY VEHICLE INSTANCES");
    let _ = writeln!(
        out,
        "AllLive={}, Parked={}, Active={}, Pending={}, StatusTotal={}",
        h.all_live,
        h.parked,
        h.active,
        h.pending,
        h.status_total()
    );
    let _ = writeln!(
        out,
        "Trailers={} (Unspawned={})",
        h.trailers, h.trailers_unspawned
    );
    let _ = writeln!(
        out,
        "Unspawned={} (WithOwner={}), HiddenParked={}",
        h.unspawned, h.unspawned_with_owner, h.hidden_parked
    );
    let _ = writeln!(
        out,
        "Hidden split: InBuildings={}, AtBorder={}",
        h.hidden_in_buildings, h.hidden_at_border
    );
}

fn border_section(out: &mut String, census: &VehicleCensus) {
    let b = &census.border;
    header(out, "HIDDEN AT BORDER");
    let _ = writeln!(out, "Examined={}", b.examined);
    let _ = writeln!(out, "A OwnerNotAtBorder={}", b.owner_elsewhere);
    let _ = writeln!(out, "B OwnerAtBorder={}", b.owner_at_border);
    let _ = writeln!(
        out,
        "C Unresolved={} (OwnerMissing={}, NotHousehold={}, Tourist={})",
        b.unresolved.total(),
        b.unresolved.owner_missing,
        b.unresolved.not_household,
        b.unresolved.excluded
    );
    let _ = writeln!(
        out,
        "CandidateHouseholds={}, HouseholdsAtBorder={}",
        b.candidate_households, b.households_at_border
    );
    if b.is_consistent() {
        let _ = writeln!(out, "Self-check A+B+C == Examined: OK");
    } else {
        let _ = writeln!(
            out,
            "Self-check A+B+C == Examined: DIFF ({} != {})",
            b.partition_total(),
            b.examined
        );
    }
    if let Some(samples) = &b.samples {
        samples_lines(out, "A", &samples.owner_elsewhere);
        samples_lines(out, "B", &samples.owner_at_border);
        samples_lines(out, "C", &samples.unresolved);
    }
}

fn samples_lines(out: &mut String, bucket: &str, samples: &HeadTailSamples) {
    let _ = writeln!(out, "{bucket} head (Index:Generation) = {}", samples.format_head());
    let _ = writeln!(out, "{bucket} tail (Index:Generation) = {}", samples.format_tail());
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "<none>".to_string()
    } else {
        items.join(", ")
    }
}
