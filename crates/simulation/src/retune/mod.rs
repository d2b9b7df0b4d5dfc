//! Prototype retuning: light-vehicle drive values, sway spring and path
//! surface speeds, recomputed from frozen baselines on explicit request.

mod error;
mod plugin;
mod systems;
mod targets;
mod types;

pub use error::RetuneError;
pub use plugin::RetunePlugin;
pub use systems::{reapply_prototypes, RetuneTargets, SETTINGS_NON_FINITE_KEY};
pub use targets::{accel_brake_scalar, pass_sway, pathway_target, sway_targets, vehicle_targets};
pub use types::{RetuneMode, RetuneOutcome, RetuneSchedule};
