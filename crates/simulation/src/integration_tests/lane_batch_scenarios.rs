use crate::lane_batch::LaneBatchScheduler;
use crate::settings::TuningSettings;
use crate::test_harness::TestWorld;
use crate::units::kmh_to_ms;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_five_thousand_lanes_drain_in_three_ticks() {
    let mut city = TestWorld::with_settings(TuningSettings {
        path_speed_scalar: 2.0,
        ..Default::default()
    });
    let path = city.path_prototype(18.0);
    let lanes = city.path_lanes(path, 5000);
    city.enter_city();

    // Retune, begin and the first chunk all land in the first tick.
    city.tick(1);
    assert_eq!(city.lane_batch().progress(), Some((2952, 5000)));
    city.tick(1);
    assert_eq!(city.lane_batch().progress(), Some((904, 5000)));
    city.tick(1);
    assert!(!city.lane_batch().is_active());

    let stats = &city.lane_batch().stats;
    assert_eq!(stats.ticks, 3);
    assert_eq!(stats.lanes_written, 5000);
    let expected = kmh_to_ms(36.0);
    assert!(lanes.iter().all(|&l| close(city.lane(l).speed_limit, expected)));
    assert!(lanes
        .iter()
        .all(|&l| close(city.lane(l).default_speed_limit, expected)));
}

#[test]
fn test_roads_keep_their_speed() {
    let mut city = TestWorld::with_settings(TuningSettings {
        path_speed_scalar: 4.0,
        ..Default::default()
    });
    let path = city.path_prototype(15.0);
    city.path_lanes(path, 10);
    let road = city.road_lane(13.9);
    city.enter_city();
    city.tick_until_lanes_idle(10);
    assert!(close(city.lane(road).speed_limit, 13.9));
}

#[test]
fn test_scalar_change_mid_run_supersedes() {
    let mut city = TestWorld::with_settings(TuningSettings {
        path_speed_scalar: 2.0,
        ..Default::default()
    });
    city.world_mut()
        .insert_resource(LaneBatchScheduler::with_chunk_size(100));
    let path = city.path_prototype(18.0);
    let lanes = city.path_lanes(path, 350);
    city.enter_city();
    city.tick(1);
    assert_eq!(city.lane_batch().progress(), Some((250, 350)));

    city.settings_mut().path_speed_scalar = 3.0;
    city.tick(1);
    assert_eq!(city.tick_until_lanes_idle(10), 3);

    let stats = &city.lane_batch().stats;
    assert_eq!(stats.runs_superseded, 1);
    assert_eq!(stats.runs_started, 2);
    let expected = kmh_to_ms(54.0);
    assert!(lanes.iter().all(|&l| close(city.lane(l).speed_limit, expected)));
}

#[test]
fn test_unchanged_path_scalar_starts_no_new_run() {
    let mut city = TestWorld::new();
    let path = city.path_prototype(18.0);
    city.path_lanes(path, 10);
    city.enter_city();
    city.tick_until_lanes_idle(10);

    city.settings_mut().speed_scalar = 3.0;
    city.tick(2);
    assert_eq!(city.lane_batch().stats.runs_started, 1);
}
