use bevy::prelude::*;

/// Network edge. Lanes point at their edge through [`super::Owner`].
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Edge;

/// Edge is a road (not a path). Road lanes are never touched by the path batch.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Road;

/// Drivable lane speed limits (m/s).
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct CarLane {
    pub speed_limit: f32,
    pub default_speed_limit: f32,
}

/// Anchor marker: the entity is part of a connection to the world outside the
/// simulated area.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct OutsideConnection;

/// Lane that links the network to a connection point.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ConnectionLane;
