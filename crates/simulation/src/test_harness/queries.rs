use bevy::prelude::*;

use crate::components::{CarData, CarLane, PathwayComposition, PathwayData, SwayingData};
use crate::lane_batch::LaneBatchScheduler;
use crate::report::DiagnosticReport;
use crate::retune::RetuneOutcome;
use crate::status::StatusCache;
use crate::units::ms_to_kmh;

use super::TestWorld;

impl TestWorld {
    pub fn car_data(&self, prototype: Entity) -> CarData {
        self.world()
            .get::<CarData>(prototype)
            .copied()
            .unwrap_or_default()
    }

    pub fn max_speed_kmh(&self, prototype: Entity) -> f32 {
        ms_to_kmh(self.car_data(prototype).max_speed)
    }

    pub fn sway(&self, prototype: Entity) -> SwayingData {
        self.world()
            .get::<SwayingData>(prototype)
            .copied()
            .unwrap_or_default()
    }

    pub fn path_speed(&self, prototype: Entity) -> f32 {
        self.world()
            .get::<PathwayData>(prototype)
            .map_or(0.0, |d| d.speed_limit)
    }

    pub fn composition_speed(&self, composition: Entity) -> f32 {
        self.world()
            .get::<PathwayComposition>(composition)
            .map_or(0.0, |c| c.speed_limit)
    }

    pub fn lane(&self, lane: Entity) -> CarLane {
        self.world().get::<CarLane>(lane).copied().unwrap_or_default()
    }

    pub fn lane_batch(&self) -> &LaneBatchScheduler {
        self.resource::<LaneBatchScheduler>()
    }

    pub fn retune_outcome(&self) -> &RetuneOutcome {
        self.resource::<RetuneOutcome>()
    }

    pub fn report_text(&self) -> Option<&str> {
        self.resource::<DiagnosticReport>().text()
    }

    pub fn status(&self) -> &StatusCache {
        self.resource::<StatusCache>()
    }
}
