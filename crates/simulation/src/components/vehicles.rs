use bevy::prelude::*;

/// Citizen-owned vehicle (cars, bicycles and e-scooters alike).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PersonalCar;

/// Trailer hitched to a personal car. Not a drivable vehicle.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CarTrailer;

/// Parked state. Takes precedence over [`CarCurrentLane`] when both exist.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkedCar {
    pub lane: Entity,
}

/// Driving state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarCurrentLane {
    pub lane: Entity,
}

/// Instance exists logically but has no visible object in the world.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Unspawned;
