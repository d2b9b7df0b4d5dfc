//! Read-only classification of the personal vehicle population.
//!
//! One scan yields the counts behind the status rows and the detailed
//! sections of the diagnostic report, including the hidden-at-border
//! buckets used to explain parked cars that never appear on screen.

mod chain;
mod samples;
mod scan;
mod types;

pub use chain::{anchor_in_chain, is_scooter_name};
pub use samples::{format_entities, HeadTailSamples};
pub use scan::CensusScan;
pub use types::{
    BorderBuckets, BucketSamples, HeavyVehicleCounts, LightVehicleCounts, ReportDetail,
    UnresolvedCounts, UnresolvedOwner, VehicleCensus, VehicleStatus,
};
