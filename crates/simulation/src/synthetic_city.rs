//! Seeded synthetic cities for the headless runner, benches and tests.
//!
//! Everything is spawned straight into a [`World`]: prototypes with authored
//! values, a path network next to a road network, outside connections with
//! connection lanes, households with members spread over buildings, and a
//! personal vehicle population. The ownership graph deliberately contains
//! dangling owners, tourists and cycles so the census has to cope with them.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::components::{
    BicycleData, CarCurrentLane, CarData, CarLane, CarTrailer, Citizen, ConnectionLane,
    CurrentBuilding, Edge, Household, HouseholdMember, OutsideConnection, Owner, ParkedCar,
    PathwayAuthoring, PathwayComposition, PathwayData, PersonalCar, PrefabData, PrefabRef, Road,
    SwayingData, TouristHousehold, Unspawned, VehicleAuthoring,
};
use crate::units::kmh_to_ms;

const ROAD_SPEED_MS: f32 = 13.9;

/// Shape of a synthetic city. Counts are exact; mixes are probabilities.
#[derive(Debug, Clone)]
pub struct CityLayout {
    pub seed: u64,
    pub path_prototypes: usize,
    pub path_lanes: usize,
    pub road_lanes: usize,
    pub outside_connections: usize,
    pub buildings: usize,
    pub households: usize,
    pub members_per_household: usize,
    pub bikes: usize,
    pub cars: usize,
    /// Heavy cars parked unspawned on connection lanes.
    pub border_cars: usize,
    /// Share of buildings sitting inside an outside connection.
    pub border_building_share: f64,
    /// Share of connection lanes whose owner chain is a cycle.
    pub cyclic_lane_share: f64,
}

impl Default for CityLayout {
    fn default() -> Self {
        Self {
            seed: 42,
            path_prototypes: 3,
            path_lanes: 600,
            road_lanes: 400,
            outside_connections: 4,
            buildings: 40,
            households: 60,
            members_per_household: 2,
            bikes: 300,
            cars: 200,
            border_cars: 80,
            border_building_share: 0.2,
            cyclic_lane_share: 0.1,
        }
    }
}

/// Ids of what [`SyntheticCity::spawn`] created.
#[derive(Debug, Default)]
pub struct SyntheticCity {
    pub bike_prototypes: Vec<Entity>,
    pub car_prototype: Option<Entity>,
    pub path_prototypes: Vec<Entity>,
    pub compositions: Vec<Entity>,
    pub path_lanes: Vec<Entity>,
    pub road_lanes: Vec<Entity>,
    pub connection_lanes: Vec<Entity>,
    pub buildings: Vec<Entity>,
    pub households: Vec<Entity>,
    pub vehicles: Vec<Entity>,
}

// ---------------------------------------------------------------------------
// Single-entity spawners
// ---------------------------------------------------------------------------

/// Light-vehicle prototype whose live data equals its authoring.
pub fn spawn_light_prototype(world: &mut World, name: &str, authoring: VehicleAuthoring) -> Entity {
    world
        .spawn((
            PrefabData::named(name),
            BicycleData,
            authoring,
            CarData {
                max_speed: kmh_to_ms(authoring.max_speed_kmh),
                acceleration: authoring.acceleration,
                braking: authoring.braking,
            },
            SwayingData {
                max_position: Vec3::new(0.0, 0.15, 0.35),
                damping_factors: Vec3::new(0.9, 0.85, 0.6),
                spring_factors: Vec3::new(8.0, 10.0, 12.0),
            },
        ))
        .id()
}

pub fn spawn_heavy_prototype(world: &mut World, name: &str) -> Entity {
    world
        .spawn((
            PrefabData::named(name),
            CarData {
                max_speed: kmh_to_ms(160.0),
                acceleration: 6.0,
                braking: 12.0,
            },
        ))
        .id()
}

/// Path prototype with live speed at its authored value.
pub fn spawn_path_prototype(world: &mut World, name: &str, speed_limit_kmh: f32) -> Entity {
    world
        .spawn((
            PrefabData::named(name),
            PathwayAuthoring { speed_limit_kmh },
            PathwayData {
                speed_limit: kmh_to_ms(speed_limit_kmh),
            },
        ))
        .id()
}

pub fn spawn_composition(world: &mut World, path_prototype: Entity) -> Entity {
    let speed_limit = world
        .get::<PathwayData>(path_prototype)
        .map_or(0.0, |d| d.speed_limit);
    world
        .spawn((PrefabRef(path_prototype), PathwayComposition { speed_limit }))
        .id()
}

/// One lane on a fresh edge of `prototype`. Road edges get the road marker.
pub fn spawn_lane(world: &mut World, prototype: Entity, road: bool, speed_limit: f32) -> Entity {
    let edge = world.spawn((Edge, PrefabRef(prototype))).id();
    if road {
        world.entity_mut(edge).insert(Road);
    }
    world
        .spawn((
            CarLane {
                speed_limit,
                default_speed_limit: speed_limit,
            },
            Owner(edge),
        ))
        .id()
}

// ---------------------------------------------------------------------------
// Whole city
// ---------------------------------------------------------------------------

impl SyntheticCity {
    pub fn spawn(world: &mut World, layout: &CityLayout) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(layout.seed);
        let mut city = SyntheticCity::default();

        city.spawn_prototypes(world, layout);
        city.spawn_network(world, layout, &mut rng);
        city.spawn_population(world, layout, &mut rng);
        city.spawn_vehicles(world, layout, &mut rng);
        city
    }

    fn spawn_prototypes(&mut self, world: &mut World, layout: &CityLayout) {
        for (name, kmh) in [
            ("Bicycle01", 20.0),
            ("Bicycle02", 22.0),
            ("Bicycle03", 18.0),
            ("ElectricScooter01", 25.0),
        ] {
            self.bike_prototypes.push(spawn_light_prototype(
                world,
                name,
                VehicleAuthoring {
                    max_speed_kmh: kmh,
                    acceleration: 1.5,
                    braking: 3.0,
                },
            ));
        }
        self.car_prototype = Some(spawn_heavy_prototype(world, "Hatchback01"));

        for i in 0..layout.path_prototypes {
            let kmh = 15.0 + 5.0 * i as f32;
            let prototype = spawn_path_prototype(world, &format!("Pathway{i:02}"), kmh);
            self.path_prototypes.push(prototype);
            self.compositions.push(spawn_composition(world, prototype));
        }
    }

    fn spawn_network(&mut self, world: &mut World, layout: &CityLayout, rng: &mut ChaCha8Rng) {
        let road_prototype = world.spawn(PrefabData::named("RoadSmall")).id();

        if !self.path_prototypes.is_empty() {
            for _ in 0..layout.path_lanes {
                let prototype = self.path_prototypes[rng.gen_range(0..self.path_prototypes.len())];
                let speed = world
                    .get::<PathwayData>(prototype)
                    .map_or(0.0, |d| d.speed_limit);
                self.path_lanes.push(spawn_lane(world, prototype, false, speed));
            }
        }
        for _ in 0..layout.road_lanes {
            self.road_lanes
                .push(spawn_lane(world, road_prototype, true, ROAD_SPEED_MS));
        }

        let mut connections = Vec::with_capacity(layout.outside_connections);
        for _ in 0..layout.outside_connections {
            let connection = world.spawn(OutsideConnection).id();
            connections.push(connection);
            // Lane -> connector node -> outside connection.
            let node = world.spawn(Owner(connection)).id();
            self.connection_lanes
                .push(world.spawn((ConnectionLane, Owner(node))).id());
        }
        let cyclic = (layout.outside_connections as f64 * layout.cyclic_lane_share).ceil() as usize;
        for _ in 0..cyclic {
            let a = world.spawn_empty().id();
            let b = world.spawn(Owner(a)).id();
            world.entity_mut(a).insert(Owner(b));
            self.connection_lanes
                .push(world.spawn((ConnectionLane, Owner(a))).id());
        }

        for _ in 0..layout.buildings {
            let building = match connections.choose(rng) {
                Some(&connection) if rng.gen_bool(layout.border_building_share) => {
                    world.spawn(Owner(connection)).id()
                }
                _ => world.spawn_empty().id(),
            };
            self.buildings.push(building);
        }
    }

    fn spawn_population(&mut self, world: &mut World, layout: &CityLayout, rng: &mut ChaCha8Rng) {
        for _ in 0..layout.households {
            let household = if rng.gen_bool(0.1) {
                world.spawn((Household, TouristHousehold)).id()
            } else {
                world.spawn(Household).id()
            };
            self.households.push(household);
            for _ in 0..layout.members_per_household {
                let building = self
                    .buildings
                    .choose(rng)
                    .copied()
                    .unwrap_or(Entity::PLACEHOLDER);
                world.spawn((
                    Citizen,
                    HouseholdMember { household },
                    CurrentBuilding { building },
                ));
            }
        }
    }

    fn spawn_vehicles(&mut self, world: &mut World, layout: &CityLayout, rng: &mut ChaCha8Rng) {
        let street_lanes: Vec<Entity> = self
            .path_lanes
            .iter()
            .chain(&self.road_lanes)
            .copied()
            .collect();

        for _ in 0..layout.bikes {
            let Some(&prototype) = self.bike_prototypes.choose(rng) else {
                break;
            };
            let lane = street_lanes.choose(rng).copied().unwrap_or(Entity::PLACEHOLDER);
            let owner = self.random_household(rng);
            let v = world.spawn((PersonalCar, PrefabRef(prototype), Owner(owner))).id();
            // Mostly riding, some parked, a few not placed yet.
            match rng.gen_range(0..10) {
                0..=5 => {
                    world.entity_mut(v).insert(CarCurrentLane { lane });
                }
                6..=8 => {
                    world.entity_mut(v).insert(ParkedCar { lane });
                }
                _ => {}
            }
            self.vehicles.push(v);
        }

        let Some(car) = self.car_prototype else {
            return;
        };
        for _ in 0..layout.cars {
            let lane = street_lanes.choose(rng).copied().unwrap_or(Entity::PLACEHOLDER);
            let owner = self.random_household(rng);
            let v = world.spawn((PersonalCar, PrefabRef(car), Owner(owner))).id();
            if rng.gen_bool(0.5) {
                world.entity_mut(v).insert(CarCurrentLane { lane });
            } else {
                world.entity_mut(v).insert((ParkedCar { lane }, Unspawned));
            }
            if rng.gen_bool(0.05) {
                world.spawn((PersonalCar, CarTrailer, PrefabRef(car), Owner(v)));
            }
            self.vehicles.push(v);
        }

        for _ in 0..layout.border_cars {
            let lane = self
                .connection_lanes
                .choose(rng)
                .copied()
                .unwrap_or(Entity::PLACEHOLDER);
            let v = world
                .spawn((PersonalCar, PrefabRef(car), ParkedCar { lane }, Unspawned))
                .id();
            match rng.gen_range(0..10) {
                0 => {}
                1 => {
                    world.entity_mut(v).insert(Owner(Entity::PLACEHOLDER));
                }
                2 => {
                    let company = world.spawn_empty().id();
                    world.entity_mut(v).insert(Owner(company));
                }
                _ => {
                    let owner = self.random_household(rng);
                    world.entity_mut(v).insert(Owner(owner));
                }
            }
            self.vehicles.push(v);
        }
    }

    fn random_household(&self, rng: &mut ChaCha8Rng) -> Entity {
        self.households
            .choose(rng)
            .copied()
            .unwrap_or(Entity::PLACEHOLDER)
    }
}
