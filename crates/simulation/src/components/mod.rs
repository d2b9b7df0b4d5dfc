//! Host data model.
//!
//! Records and prototypes are plain ECS entities; every tunable field and
//! state flag is a typed component. Presence of a component is the capability
//! check (`Query::get` / `Query::contains`), so no runtime reflection is
//! involved in deciding whether a record carries retunable data.

pub mod citizens;
pub mod common;
pub mod net;
pub mod prefabs;
pub mod vehicles;

pub use citizens::{Citizen, CurrentBuilding, Household, HouseholdMember, TouristHousehold};
pub use common::{Deleted, Destroyed, Overridden, Owner, Temp};
pub use net::{CarLane, ConnectionLane, Edge, OutsideConnection, Road};
pub use prefabs::{
    BicycleData, CarData, PathwayAuthoring, PathwayComposition, PathwayData, PrefabData,
    PrefabRef, SwayingData, VehicleAuthoring,
};
pub use vehicles::{CarCurrentLane, CarTrailer, ParkedCar, PersonalCar, Unspawned};
