use bevy::ecs::entity::Entities;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::components::{
    BicycleData, CarCurrentLane, CarTrailer, Citizen, ConnectionLane, CurrentBuilding, Deleted,
    Destroyed, Household, HouseholdMember, OutsideConnection, Owner, ParkedCar, PersonalCar,
    PrefabData, PrefabRef, Temp, TouristHousehold, Unspawned,
};
use crate::config::MAX_OWNER_CHAIN_DEPTH;

use super::chain::{anchor_in_chain, is_scooter_name};
use super::types::{BucketSamples, ReportDetail, UnresolvedOwner, VehicleCensus, VehicleStatus};

type Counted = (Without<Deleted>, Without<Temp>, Without<Destroyed>);

type VehicleItem = (
    Entity,
    &'static PrefabRef,
    Option<&'static ParkedCar>,
    Has<CarCurrentLane>,
    Has<Unspawned>,
    Option<&'static Owner>,
);

/// Everything the census reads. Never mutates.
#[derive(SystemParam)]
pub struct CensusScan<'w, 's> {
    entities: &'w Entities,
    vehicles: Query<
        'w,
        's,
        VehicleItem,
        (With<PersonalCar>, Without<CarTrailer>, Counted),
    >,
    trailers: Query<'w, 's, Has<Unspawned>, (With<PersonalCar>, With<CarTrailer>, Counted)>,
    light_prototypes: Query<'w, 's, &'static PrefabData, With<BicycleData>>,
    owners: Query<'w, 's, &'static Owner>,
    anchors: Query<'w, 's, (), With<OutsideConnection>>,
    connection_lanes: Query<'w, 's, (), With<ConnectionLane>>,
    households: Query<'w, 's, Has<TouristHousehold>, With<Household>>,
    tourists: Query<'w, 's, (), With<TouristHousehold>>,
    members: Query<
        'w,
        's,
        (&'static HouseholdMember, &'static CurrentBuilding),
        (With<Citizen>, Counted),
    >,
}

impl CensusScan<'_, '_> {
    /// Bounded upward walk from `start` looking for an outside connection.
    pub fn anchor_in_chain(&self, start: Entity) -> bool {
        anchor_in_chain(
            start,
            MAX_OWNER_CHAIN_DEPTH,
            |e| self.anchors.contains(e),
            |e| self.owners.get(e).ok().and_then(Owner::get),
        )
    }

    /// A lane belongs to the border when it is an outside connection itself,
    /// or a connection lane somewhere under one.
    pub fn is_anchor_lane(&self, lane: Entity) -> bool {
        if lane == Entity::PLACEHOLDER {
            return false;
        }
        if self.anchors.contains(lane) {
            return true;
        }
        if !self.connection_lanes.contains(lane) {
            return false;
        }
        self.anchor_in_chain(lane)
    }

    /// Resolve a vehicle owner to a resident household.
    pub fn resident_household(&self, owner: Option<&Owner>) -> Result<Entity, UnresolvedOwner> {
        let owner = owner
            .and_then(Owner::get)
            .filter(|e| self.entities.contains(*e))
            .ok_or(UnresolvedOwner::Missing)?;
        if self.tourists.contains(owner) {
            return Err(UnresolvedOwner::Excluded);
        }
        match self.households.get(owner) {
            Ok(false) => Ok(owner),
            Ok(true) => Err(UnresolvedOwner::Excluded),
            Err(_) => Err(UnresolvedOwner::NotHousehold),
        }
    }

    /// Count every personal vehicle and bucket the hidden ones at the border.
    pub fn take(&self, detail: ReportDetail) -> VehicleCensus {
        let mut census = VehicleCensus::default();
        let mut samples = (detail == ReportDetail::Samples).then(BucketSamples::default);
        let mut candidates: Vec<(Entity, Entity)> = Vec::new();

        for (vehicle, prefab, parked, has_lane, unspawned, owner) in self.vehicles.iter() {
            if prefab.0 == Entity::PLACEHOLDER {
                continue;
            }
            let status = VehicleStatus::classify(parked.is_some(), has_lane);

            if let Ok(prototype) = self.light_prototypes.get(prefab.0) {
                census
                    .light
                    .record(status, is_scooter_name(&prototype.name), unspawned);
                continue;
            }

            let owned = owner.and_then(Owner::get).is_some();
            census.heavy.record(status, unspawned, owned);

            let Some(parked) = parked else { continue };
            if !unspawned {
                continue;
            }
            let at_border = self.is_anchor_lane(parked.lane);
            if owned {
                if at_border {
                    census.heavy.hidden_at_border += 1;
                } else {
                    census.heavy.hidden_in_buildings += 1;
                }
            }
            if !at_border {
                continue;
            }

            census.border.examined += 1;
            match self.resident_household(owner) {
                Ok(household) => candidates.push((vehicle, household)),
                Err(reason) => {
                    census.border.unresolved.record(reason);
                    if let Some(s) = samples.as_mut() {
                        s.unresolved.push(vehicle);
                    }
                }
            }
        }

        for unspawned in self.trailers.iter() {
            census.heavy.record_trailer(unspawned);
        }

        let candidate_households: HashSet<Entity> = candidates.iter().map(|(_, h)| *h).collect();
        let at_border = self.households_at_border(&candidate_households);
        census.border.candidate_households = candidate_households.len();
        census.border.households_at_border = at_border.len();

        for (vehicle, household) in candidates {
            let present = at_border.contains(&household);
            if present {
                census.border.owner_at_border += 1;
            } else {
                census.border.owner_elsewhere += 1;
            }
            if let Some(s) = samples.as_mut() {
                if present {
                    s.owner_at_border.push(vehicle);
                } else {
                    s.owner_elsewhere.push(vehicle);
                }
            }
        }

        census.border.samples = samples;
        census
    }

    /// Candidate households with at least one member currently inside an
    /// outside connection.
    fn households_at_border(&self, candidates: &HashSet<Entity>) -> HashSet<Entity> {
        if candidates.is_empty() {
            return HashSet::new();
        }
        // Buildings are shared by many members; walk each once.
        let mut visited: HashMap<Entity, bool> = HashMap::new();
        let mut present = HashSet::new();
        for (member, location) in self.members.iter() {
            if !candidates.contains(&member.household) || present.contains(&member.household) {
                continue;
            }
            let building = location.building;
            let anchored = *visited
                .entry(building)
                .or_insert_with(|| self.anchor_in_chain(building));
            if anchored {
                present.insert(member.household);
            }
        }
        present
    }
}
