//! Multi-tick propagation of path speeds onto existing lanes.
//!
//! Path networks can hold far more lanes than one tick should touch, so a run
//! snapshots the lane ids once and drains them a bounded chunk per tick.

mod plugin;
mod systems;
#[cfg(test)]
mod tests;
mod types;

pub use plugin::LaneBatchPlugin;
pub use systems::{begin_lane_batch, continue_lane_batch, PathLaneLookups};
pub use types::{BatchCursor, DesiredSpeedCache, LaneBatchScheduler, LaneBatchStats, LaneVisit};
