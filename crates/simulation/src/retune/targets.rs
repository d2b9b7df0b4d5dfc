//! Target computation: baseline in, retuned values out. No ECS access.

use bevy::prelude::*;

use crate::baseline::{PathwayBaseline, SwayBaseline, VehicleBaseline};
use crate::components::{CarData, SwayingData};
use crate::config::{MIN_WRITTEN_SPEED_MS, SCALAR_EPSILON, SWAY_DAMPING_MAX, SWAY_DAMPING_MIN};
use crate::settings::EffectiveScalars;
use crate::units::kmh_to_ms;

use super::error::RetuneError;

/// Softened response for acceleration and braking: `sqrt(max(0.01, speed))`.
pub fn accel_brake_scalar(speed_scalar: f32) -> f32 {
    speed_scalar.max(0.0).max(SCALAR_EPSILON).sqrt()
}

/// Drive values for a light-vehicle prototype. Non-positive authored values
/// stay at zero.
pub fn vehicle_targets(
    prototype: Entity,
    baseline: &VehicleBaseline,
    scalars: &EffectiveScalars,
) -> Result<CarData, RetuneError> {
    finite(prototype, "authored max speed", baseline.max_speed_kmh)?;
    finite(prototype, "authored acceleration", baseline.acceleration)?;
    finite(prototype, "authored braking", baseline.braking)?;

    let speed = scalars.speed.max(0.0);
    let soft = accel_brake_scalar(speed);
    let base_ms = kmh_to_ms(baseline.max_speed_kmh);

    let target = CarData {
        max_speed: if base_ms <= 0.0 {
            0.0
        } else {
            (base_ms * speed).max(MIN_WRITTEN_SPEED_MS)
        },
        acceleration: if baseline.acceleration <= 0.0 {
            0.0
        } else {
            baseline.acceleration * soft
        },
        braking: if baseline.braking <= 0.0 {
            0.0
        } else {
            baseline.braking * soft
        },
    };

    finite(prototype, "max speed", target.max_speed)?;
    finite(prototype, "acceleration", target.acceleration)?;
    finite(prototype, "braking", target.braking)?;
    Ok(target)
}

/// Sway spring for a light-vehicle prototype.
///
/// Amplitude is divided by stiffness and damping factors are divided by the
/// damping scalar, then held inside the stable band. The band applies at
/// neutral scalars too.
pub fn sway_targets(
    prototype: Entity,
    baseline: &SwayBaseline,
    scalars: &EffectiveScalars,
) -> Result<SwayingData, RetuneError> {
    finite_vec(prototype, "sway amplitude", baseline.max_position)?;
    finite_vec(prototype, "sway damping", baseline.damping_factors)?;

    let stiff = scalars.stiffness.max(SCALAR_EPSILON);
    let damp = scalars.damping.max(SCALAR_EPSILON);
    let target = SwayingData {
        max_position: baseline.max_position / stiff,
        damping_factors: (baseline.damping_factors / damp)
            .clamp(Vec3::splat(SWAY_DAMPING_MIN), Vec3::splat(SWAY_DAMPING_MAX)),
        spring_factors: baseline.spring_factors,
    };

    finite_vec(prototype, "sway amplitude", target.max_position)?;
    finite_vec(prototype, "sway damping", target.damping_factors)?;
    Ok(target)
}

/// Sway a pass writes. Restoring passes put the captured baseline back
/// exactly, band or not.
pub fn pass_sway(
    prototype: Entity,
    baseline: &SwayBaseline,
    scalars: &EffectiveScalars,
    restore: bool,
) -> Result<SwayingData, RetuneError> {
    if !restore {
        return sway_targets(prototype, baseline, scalars);
    }
    finite_vec(prototype, "sway amplitude", baseline.max_position)?;
    finite_vec(prototype, "sway damping", baseline.damping_factors)?;
    Ok(*baseline)
}

/// Path surface speed in m/s.
pub fn pathway_target(
    prototype: Entity,
    baseline: &PathwayBaseline,
    path_scalar: f32,
) -> Result<f32, RetuneError> {
    let target = kmh_to_ms(baseline.speed_limit_kmh) * path_scalar.max(SCALAR_EPSILON);
    finite(prototype, "path speed", target)
}

fn finite(prototype: Entity, field: &'static str, value: f32) -> Result<f32, RetuneError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RetuneError::NonFinite { prototype, field })
    }
}

fn finite_vec(prototype: Entity, field: &'static str, value: Vec3) -> Result<Vec3, RetuneError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RetuneError::NonFinite { prototype, field })
    }
}
