use serde::Serialize;

use super::samples::HeadTailSamples;

/// How much the census collects beyond plain counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportDetail {
    #[default]
    Summary,
    /// Head/tail entity samples per bucket.
    Samples,
}

impl ReportDetail {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Self::Samples
        } else {
            Self::Summary
        }
    }
}

/// Three-state instance status. Parked wins over active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    Parked,
    Active,
    /// Neither parked nor on a lane yet.
    Pending,
}

impl VehicleStatus {
    pub fn classify(parked: bool, has_lane: bool) -> Self {
        if parked {
            Self::Parked
        } else if has_lane {
            Self::Active
        } else {
            Self::Pending
        }
    }
}

/// Bicycles and e-scooters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LightVehicleCounts {
    pub all_live: usize,
    pub active: usize,
    pub parked: usize,
    pub pending: usize,
    pub bikes_active: usize,
    pub bikes_parked: usize,
    pub scooters_active: usize,
    pub scooters_parked: usize,
    pub unspawned: usize,
    pub unspawned_parked: usize,
}

impl LightVehicleCounts {
    pub fn record(&mut self, status: VehicleStatus, scooter: bool, unspawned: bool) {
        self.all_live += 1;
        if unspawned {
            self.unspawned += 1;
        }
        match status {
            VehicleStatus::Parked => {
                self.parked += 1;
                if unspawned {
                    self.unspawned_parked += 1;
                }
                if scooter {
                    self.scooters_parked += 1;
                } else {
                    self.bikes_parked += 1;
                }
            }
            VehicleStatus::Active => {
                self.active += 1;
                if scooter {
                    self.scooters_active += 1;
                } else {
                    self.bikes_active += 1;
                }
            }
            VehicleStatus::Pending => self.pending += 1,
        }
    }

    /// Parked plus active; pending instances are not shown.
    pub fn status_total(&self) -> usize {
        self.parked + self.active
    }

    pub fn bikes(&self) -> usize {
        self.bikes_active + self.bikes_parked
    }

    pub fn scooters(&self) -> usize {
        self.scooters_active + self.scooters_parked
    }
}

/// Everything that is not a light vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeavyVehicleCounts {
    pub all_live: usize,
    pub active: usize,
    pub parked: usize,
    pub pending: usize,
    pub unspawned: usize,
    pub unspawned_with_owner: usize,
    /// Parked, unspawned and owned.
    pub hidden_parked: usize,
    pub hidden_in_buildings: usize,
    pub hidden_at_border: usize,
    pub trailers: usize,
    pub trailers_unspawned: usize,
}

impl HeavyVehicleCounts {
    pub fn record(&mut self, status: VehicleStatus, unspawned: bool, owned: bool) {
        self.all_live += 1;
        match status {
            VehicleStatus::Parked => self.parked += 1,
            VehicleStatus::Active => self.active += 1,
            VehicleStatus::Pending => self.pending += 1,
        }
        if unspawned {
            self.unspawned += 1;
            if owned {
                self.unspawned_with_owner += 1;
            }
            if owned && status == VehicleStatus::Parked {
                self.hidden_parked += 1;
            }
        }
    }

    pub fn record_trailer(&mut self, unspawned: bool) {
        self.trailers += 1;
        if unspawned {
            self.trailers_unspawned += 1;
        }
    }

    pub fn status_total(&self) -> usize {
        self.parked + self.active
    }
}

/// Why a border-parked vehicle's owner could not be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedOwner {
    /// No owner, a null owner, or an owner that no longer exists.
    Missing,
    /// Owner exists but is not a household.
    NotHousehold,
    /// Visiting household.
    Excluded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UnresolvedCounts {
    pub owner_missing: usize,
    pub not_household: usize,
    pub excluded: usize,
}

impl UnresolvedCounts {
    pub fn record(&mut self, reason: UnresolvedOwner) {
        match reason {
            UnresolvedOwner::Missing => self.owner_missing += 1,
            UnresolvedOwner::NotHousehold => self.not_household += 1,
            UnresolvedOwner::Excluded => self.excluded += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.owner_missing + self.not_household + self.excluded
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketSamples {
    pub owner_elsewhere: HeadTailSamples,
    pub owner_at_border: HeadTailSamples,
    pub unresolved: HeadTailSamples,
}

/// Hidden parked heavy vehicles on outside-connection lanes.
///
/// Bucket A: household owner not confirmed at the border.
/// Bucket B: a household member is currently at an outside connection.
/// Bucket C: owner could not be resolved to a resident household.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BorderBuckets {
    pub examined: usize,
    pub owner_elsewhere: usize,
    pub owner_at_border: usize,
    pub unresolved: UnresolvedCounts,
    pub candidate_households: usize,
    pub households_at_border: usize,
    #[serde(skip)]
    pub samples: Option<BucketSamples>,
}

impl BorderBuckets {
    pub fn partition_total(&self) -> usize {
        self.owner_elsewhere + self.owner_at_border + self.unresolved.total()
    }

    /// A + B + C == examined.
    pub fn is_consistent(&self) -> bool {
        self.partition_total() == self.examined
    }
}

/// One read-only scan of the vehicle population.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VehicleCensus {
    pub light: LightVehicleCounts,
    pub heavy: HeavyVehicleCounts,
    pub border: BorderBuckets,
}
