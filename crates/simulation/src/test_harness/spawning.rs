use bevy::prelude::*;

use crate::components::{
    CarCurrentLane, Citizen, ConnectionLane, CurrentBuilding, Household, HouseholdMember,
    OutsideConnection, Owner, ParkedCar, PersonalCar, PrefabRef, Unspawned, VehicleAuthoring,
};
use crate::synthetic_city::{
    spawn_composition, spawn_heavy_prototype, spawn_lane, spawn_light_prototype,
    spawn_path_prototype, CityLayout, SyntheticCity,
};

use super::TestWorld;

impl TestWorld {
    /// Bicycle-group prototype at `max_speed_kmh`, accel 2.0, braking 4.0.
    pub fn light_prototype(&mut self, name: &str, max_speed_kmh: f32) -> Entity {
        spawn_light_prototype(
            self.world_mut(),
            name,
            VehicleAuthoring {
                max_speed_kmh,
                acceleration: 2.0,
                braking: 4.0,
            },
        )
    }

    pub fn heavy_prototype(&mut self) -> Entity {
        spawn_heavy_prototype(self.world_mut(), "Hatchback01")
    }

    pub fn path_prototype(&mut self, speed_limit_kmh: f32) -> Entity {
        spawn_path_prototype(self.world_mut(), "Pathway", speed_limit_kmh)
    }

    pub fn composition(&mut self, path_prototype: Entity) -> Entity {
        spawn_composition(self.world_mut(), path_prototype)
    }

    /// `n` path lanes at the prototype's current speed.
    pub fn path_lanes(&mut self, prototype: Entity, n: usize) -> Vec<Entity> {
        let speed = self.path_speed(prototype);
        (0..n)
            .map(|_| spawn_lane(self.world_mut(), prototype, false, speed))
            .collect()
    }

    pub fn road_lane(&mut self, speed_limit: f32) -> Entity {
        let prototype = self.world_mut().spawn_empty().id();
        spawn_lane(self.world_mut(), prototype, true, speed_limit)
    }

    /// Connection lane two hops under a fresh outside connection.
    pub fn border_lane(&mut self) -> Entity {
        let world = self.world_mut();
        let connection = world.spawn(OutsideConnection).id();
        let node = world.spawn(Owner(connection)).id();
        world.spawn((ConnectionLane, Owner(node))).id()
    }

    /// Building inside an outside connection.
    pub fn border_building(&mut self) -> Entity {
        let world = self.world_mut();
        let connection = world.spawn(OutsideConnection).id();
        world.spawn(Owner(connection)).id()
    }

    pub fn household_with_member_at(&mut self, building: Entity) -> Entity {
        let world = self.world_mut();
        let household = world.spawn(Household).id();
        world.spawn((
            Citizen,
            HouseholdMember { household },
            CurrentBuilding { building },
        ));
        household
    }

    pub fn riding(&mut self, prototype: Entity, lane: Entity) -> Entity {
        self.world_mut()
            .spawn((PersonalCar, PrefabRef(prototype), CarCurrentLane { lane }))
            .id()
    }

    /// Parked out of sight, optionally owned.
    pub fn hidden_parked(
        &mut self,
        prototype: Entity,
        lane: Entity,
        owner: Option<Entity>,
    ) -> Entity {
        let world = self.world_mut();
        let v = world
            .spawn((PersonalCar, PrefabRef(prototype), ParkedCar { lane }, Unspawned))
            .id();
        if let Some(owner) = owner {
            world.entity_mut(v).insert(Owner(owner));
        }
        v
    }

    pub fn synthetic_city(&mut self, layout: &CityLayout) -> SyntheticCity {
        SyntheticCity::spawn(self.world_mut(), layout)
    }
}
