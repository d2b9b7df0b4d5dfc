use bevy::ecs::system::SystemState;

use crate::census::{CensusScan, ReportDetail, VehicleCensus};
use crate::requests::TuningRequest;
use crate::synthetic_city::CityLayout;
use crate::test_harness::TestWorld;

fn census(city: &mut TestWorld, detail: ReportDetail) -> VehicleCensus {
    let mut state = SystemState::<CensusScan>::new(city.world_mut());
    state.get(city.world()).take(detail)
}

fn report(city: &mut TestWorld) -> String {
    city.send(TuningRequest::DiagnosticReport);
    city.tick(1);
    city.report_text().map(str::to_string).unwrap_or_default()
}

#[test]
fn test_owner_visiting_the_border_lands_in_bucket_b() {
    let mut city = TestWorld::new();
    let car = city.heavy_prototype();
    let lane = city.border_lane();
    let building = city.border_building();
    let household = city.household_with_member_at(building);
    city.hidden_parked(car, lane, Some(household));
    city.enter_city();

    let text = report(&mut city);
    assert!(text.contains("Examined=1"));
    assert!(text.contains("A OwnerNotAtBorder=0"));
    assert!(text.contains("B OwnerAtBorder=1"));
    assert!(text.contains("Self-check A+B+C == Examined: OK"));
}

#[test]
fn test_owner_at_home_lands_in_bucket_a() {
    let mut city = TestWorld::new();
    let car = city.heavy_prototype();
    let lane = city.border_lane();
    let home = city.world_mut().spawn_empty().id();
    let household = city.household_with_member_at(home);
    city.hidden_parked(car, lane, Some(household));
    city.enter_city();

    let c = census(&mut city, ReportDetail::Summary);
    assert_eq!(c.border.owner_elsewhere, 1);
    assert_eq!(c.border.owner_at_border, 0);
    assert_eq!(c.heavy.hidden_at_border, 1);
}

#[test]
fn test_unowned_border_car_lands_in_bucket_c() {
    let mut city = TestWorld::new();
    let car = city.heavy_prototype();
    let lane = city.border_lane();
    city.hidden_parked(car, lane, None);
    city.enter_city();

    let text = report(&mut city);
    assert!(text.contains("C Unresolved=1 (OwnerMissing=1, NotHousehold=0, Tourist=0)"));
    assert!(text.contains("Self-check A+B+C == Examined: OK"));
}

#[test]
fn test_buckets_partition_every_seeded_city() {
    for seed in [1_u64, 7, 42, 1234, 99_999] {
        let mut city = TestWorld::new();
        let layout = CityLayout {
            seed,
            path_lanes: 50,
            road_lanes: 50,
            cyclic_lane_share: 0.5,
            ..Default::default()
        };
        city.synthetic_city(&layout);

        let c = census(&mut city, ReportDetail::Samples);
        assert!(c.border.is_consistent(), "seed {seed}: {:?}", c.border);
        assert!(c.border.examined > 0, "seed {seed}");
        assert_eq!(c.light.all_live, layout.bikes, "seed {seed}");
        assert!(c.border.households_at_border <= c.border.candidate_households);

        let samples = c.border.samples.as_ref().map_or(0, |s| {
            s.owner_elsewhere.seen() + s.owner_at_border.seen() + s.unresolved.seen()
        });
        assert_eq!(samples, c.border.examined, "seed {seed}");
    }
}

#[test]
fn test_cyclic_owner_chains_terminate() {
    let mut city = TestWorld::new();
    city.synthetic_city(&CityLayout {
        outside_connections: 2,
        cyclic_lane_share: 3.0,
        border_cars: 200,
        ..Default::default()
    });
    city.enter_city();

    let text = report(&mut city);
    assert!(text.contains("HIDDEN AT BORDER"));
    assert!(text.contains("Self-check A+B+C == Examined: OK"));
}

#[test]
fn test_riding_bikes_are_active() {
    let mut city = TestWorld::new();
    let bike = city.light_prototype("Bicycle01", 20.0);
    let scooter = city.light_prototype("ElectricScooter01", 25.0);
    let lane = city.road_lane(13.9);
    city.riding(bike, lane);
    city.riding(bike, lane);
    city.riding(scooter, lane);

    let c = census(&mut city, ReportDetail::Summary);
    assert_eq!(c.light.active, 3);
    assert_eq!(c.light.bikes_active, 2);
    assert_eq!(c.light.scooters_active, 1);
    assert_eq!(c.heavy.all_live, 0);
}
