//! Fixed-tick ordering via `SystemSet` phases.
//!
//! ```text
//! PreSim  ->  Simulation  ->  PostSim
//! ```
//!
//! * **PreSim**: Tick counter, request routing, settings change detection.
//!   Only queues work; nothing is written to prototypes or lanes here.
//! * **Simulation**: Prototype retuning, then the lane batch begin/continue
//!   pair. These are the only systems that write retuned fields.
//! * **PostSim**: Read-only reporting. Sees the values written this tick.
//!
//! All three phases run only while a city is loaded. Status polling is a UI
//! concern and lives in `Update`, outside these sets.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain: `PreSim` → `Simulation` → `PostSim`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}
