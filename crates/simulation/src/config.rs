// ---------------------------------------------------------------------------
// Scalar ranges
// ---------------------------------------------------------------------------

pub const SPEED_SCALAR_MIN: f32 = 0.30;
pub const SPEED_SCALAR_MAX: f32 = 10.0;

pub const STIFFNESS_SCALAR_MIN: f32 = 0.30;
pub const STIFFNESS_SCALAR_MAX: f32 = 5.0;

pub const DAMPING_SCALAR_MIN: f32 = 0.30;
pub const DAMPING_SCALAR_MAX: f32 = 5.0;

pub const PATH_SPEED_SCALAR_MIN: f32 = 1.0;
pub const PATH_SPEED_SCALAR_MAX: f32 = 5.0;

/// Lower bound applied before dividing or taking a square root of a scalar.
pub const SCALAR_EPSILON: f32 = 0.01;

/// Damping factors outside this band make the sway spring diverge.
pub const SWAY_DAMPING_MIN: f32 = 0.01;
pub const SWAY_DAMPING_MAX: f32 = 0.999;

/// Smallest non-zero top speed written to a prototype (m/s).
pub const MIN_WRITTEN_SPEED_MS: f32 = 0.01;

// ---------------------------------------------------------------------------
// Batching and traversal
// ---------------------------------------------------------------------------

/// Lanes processed per fixed tick by the lane batch.
pub const LANE_BATCH_CHUNK: usize = 2048;

/// Hop limit for upward owner-chain walks. Malformed graphs may contain cycles.
pub const MAX_OWNER_CHAIN_DEPTH: usize = 8;

/// Head and tail sample sizes for diagnostic buckets.
pub const SAMPLE_MAX: usize = 10;

// ---------------------------------------------------------------------------
// Status polling
// ---------------------------------------------------------------------------

pub const STATUS_REFRESH_SECS_DEFAULT: u32 = 10;
pub const STATUS_REFRESH_SECS_FLOOR: u32 = 1;

// ---------------------------------------------------------------------------
// Diagnostic report tolerances
// ---------------------------------------------------------------------------

pub const SPEED_MISMATCH_PCT: f32 = 0.05;
pub const ACCEL_MISMATCH_PCT: f32 = 0.10;
pub const BRAKE_MISMATCH_PCT: f32 = 0.10;
pub const SWAY_AMPLITUDE_MISMATCH_PCT: f32 = 0.10;
pub const SWAY_DAMPING_MISMATCH_PCT: f32 = 0.15;
pub const PATH_MISMATCH_PCT: f32 = 0.05;
pub const COMPOSITION_ABS_MISMATCH_MS: f32 = 0.10;
pub const MAX_MISMATCH_EXAMPLES: usize = 12;

/// Light-vehicle prototypes shipped with the base game. Extras (DLC, custom
/// assets) are allowed; only missing names are flagged.
pub const EXPECTED_LIGHT_VEHICLE_NAMES: &[&str] = &[
    "Bicycle01",
    "Bicycle02",
    "Bicycle03",
    "ElectricScooter01",
];

/// Prototype name prefixes that mark the scooter subtype inside the
/// light-vehicle group (case-insensitive).
pub const SCOOTER_NAME_PREFIXES: &[&str] = &["ElectricScooter", "Scooter"];
