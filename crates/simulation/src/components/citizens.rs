use bevy::prelude::*;

/// Resident household; the expected owner category of a personal vehicle.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Household;

/// Visiting household. Their vehicles are excluded from hidden-vehicle status.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TouristHousehold;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Citizen;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseholdMember {
    pub household: Entity,
}

/// Where the citizen currently is. `Entity::PLACEHOLDER` when nowhere.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentBuilding {
    pub building: Entity,
}
