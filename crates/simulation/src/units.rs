//! Speed unit conversions. Authoring data is km/h, runtime data is m/s.

#[inline]
pub fn kmh_to_ms(kmh: f32) -> f32 {
    kmh * (1.0 / 3.6)
}

#[inline]
pub fn ms_to_kmh(ms: f32) -> f32 {
    ms * 3.6
}

#[inline]
pub fn kmh_to_mph(kmh: f32) -> f32 {
    kmh * 0.621_371
}

/// Relative difference `|actual - expected| / |expected|`, guarded against a
/// zero denominator.
pub fn relative_diff(expected: f32, actual: f32) -> f32 {
    let denom = expected.abs().max(1e-6);
    (actual - expected).abs() / denom
}

/// Largest component-wise relative difference.
pub fn relative_diff_max(expected: bevy::math::Vec3, actual: bevy::math::Vec3) -> f32 {
    relative_diff(expected.x, actual.x)
        .max(relative_diff(expected.y, actual.y))
        .max(relative_diff(expected.z, actual.z))
}
