use bevy::prelude::*;

/// Marks a prototype (template) entity. Live records point at it via [`PrefabRef`].
#[derive(Component, Debug, Clone, Default)]
pub struct PrefabData {
    pub name: String,
}

impl PrefabData {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Live record -> prototype link.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefabRef(pub Entity);

/// Capability marker: the prototype belongs to the light-vehicle group
/// (bicycles and e-scooters).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BicycleData;

/// Designer-set vehicle values. Never written by the engine.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct VehicleAuthoring {
    pub max_speed_kmh: f32,
    pub acceleration: f32,
    pub braking: f32,
}

/// Runtime vehicle data on the prototype, read by every instance. Speeds in m/s.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct CarData {
    pub max_speed: f32,
    pub acceleration: f32,
    pub braking: f32,
}

/// Lean/sway spring model of a vehicle prototype.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct SwayingData {
    pub max_position: Vec3,
    pub damping_factors: Vec3,
    pub spring_factors: Vec3,
}

/// Designer-set path surface speed.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PathwayAuthoring {
    pub speed_limit_kmh: f32,
}

/// Runtime path speed on the path prototype (m/s).
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct PathwayData {
    pub speed_limit: f32,
}

/// Net-composition copy of the path speed (m/s). Composition entities carry a
/// [`PrefabRef`] to their path prototype.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct PathwayComposition {
    pub speed_limit: f32,
}
