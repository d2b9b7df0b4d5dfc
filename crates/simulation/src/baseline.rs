//! Per-prototype reference values captured on first use.
//!
//! Retuning always computes `baseline * scalar`, never `previous * scalar`,
//! so a snapshot is frozen the moment it is taken. Snapshots live for one
//! session and are cleared when a new city becomes ready.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::components::{PathwayAuthoring, SwayingData, VehicleAuthoring};

/// First-capture-wins map from prototype to snapshot.
#[derive(Debug)]
pub struct BaselineRegistry<T: Copy> {
    snapshots: HashMap<Entity, T>,
}

impl<T: Copy> Default for BaselineRegistry<T> {
    fn default() -> Self {
        Self {
            snapshots: HashMap::new(),
        }
    }
}

impl<T: Copy> BaselineRegistry<T> {
    /// Return the stored snapshot for `prototype`, or take one with `read`.
    ///
    /// `read` returning `None` means the prototype has no retunable data of
    /// this kind; nothing is stored and the caller skips it.
    pub fn capture(&mut self, prototype: Entity, read: impl FnOnce() -> Option<T>) -> Option<T> {
        if let Some(existing) = self.snapshots.get(&prototype) {
            return Some(*existing);
        }
        let snapshot = read()?;
        self.snapshots.insert(prototype, snapshot);
        Some(snapshot)
    }

    pub fn get(&self, prototype: Entity) -> Option<T> {
        self.snapshots.get(&prototype).copied()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, T)> + '_ {
        self.snapshots.iter().map(|(prototype, snapshot)| (*prototype, *snapshot))
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

/// Authored drive values of a light-vehicle prototype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleBaseline {
    pub max_speed_kmh: f32,
    pub acceleration: f32,
    pub braking: f32,
}

impl From<VehicleAuthoring> for VehicleBaseline {
    fn from(a: VehicleAuthoring) -> Self {
        Self {
            max_speed_kmh: a.max_speed_kmh,
            acceleration: a.acceleration,
            braking: a.braking,
        }
    }
}

/// Sway spring values as first observed on the live prototype.
pub type SwayBaseline = SwayingData;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathwayBaseline {
    pub speed_limit_kmh: f32,
}

impl PathwayBaseline {
    /// Paths authored with a non-positive speed are left alone.
    pub fn from_authoring(a: &PathwayAuthoring) -> Option<Self> {
        (a.speed_limit_kmh > 0.0 && a.speed_limit_kmh.is_finite()).then_some(Self {
            speed_limit_kmh: a.speed_limit_kmh,
        })
    }
}

/// All snapshots for the current session.
#[derive(Resource, Debug, Default)]
pub struct Baselines {
    pub vehicles: BaselineRegistry<VehicleBaseline>,
    pub sway: BaselineRegistry<SwayBaseline>,
    pub pathways: BaselineRegistry<PathwayBaseline>,
}

impl Baselines {
    pub fn clear(&mut self) {
        self.vehicles.clear();
        self.sway.clear();
        self.pathways.clear();
    }

    pub fn total(&self) -> usize {
        self.vehicles.len() + self.sway.len() + self.pathways.len()
    }
}
