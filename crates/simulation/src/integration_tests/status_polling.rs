use std::time::Duration;

use crate::status::{StatusView, NO_CITY_LIGHT, PLACEHOLDER_TEXT};
use crate::test_harness::TestWorld;

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn test_five_polls_in_one_frame_scan_once() {
    let mut city = TestWorld::new();
    city.enter_city();
    city.next_frame(FRAME);
    for _ in 0..5 {
        city.poll_status();
    }
    assert_eq!(city.status().computations(), 1);
}

#[test]
fn test_rows_throttled_to_refresh_interval() {
    let mut city = TestWorld::new();
    let bike = city.light_prototype("Bicycle01", 20.0);
    let lane = city.road_lane(13.9);
    city.riding(bike, lane);
    city.riding(bike, lane);
    city.enter_city();

    city.next_frame(FRAME);
    city.poll_status();
    assert_eq!(
        city.status().lines().0,
        "2 active | 2 bikes | 0 e-scooter | 0 / 2 parked/total"
    );

    city.riding(bike, lane);
    city.next_frame(Duration::from_secs(3));
    city.poll_status();
    assert_eq!(city.status().computations(), 1);
    assert!(city.status().lines().0.starts_with("2 active"));

    city.next_frame(Duration::from_secs(8));
    city.poll_status();
    assert_eq!(city.status().computations(), 2);
    assert!(city.status().lines().0.starts_with("3 active"));
    assert!(city.status().lines().1.contains("updated "));
}

#[test]
fn test_no_city_rows_outside_a_session() {
    let mut city = TestWorld::new();
    city.next_frame(FRAME);
    city.poll_status();
    assert_eq!(city.status().view(), &StatusView::NoCity);
    assert_eq!(city.status().lines().0, NO_CITY_LIGHT);

    city.enter_city();
    assert_eq!(city.status().lines(), (PLACEHOLDER_TEXT, PLACEHOLDER_TEXT));
    city.next_frame(FRAME);
    city.poll_status();
    assert!(matches!(city.status().view(), StatusView::Rows(_)));

    city.leave_city();
    city.next_frame(FRAME);
    city.poll_status();
    assert_eq!(city.status().view(), &StatusView::NoCity);
    assert_eq!(city.status().computations(), 1);
}

#[test]
fn test_settings_change_refreshes_on_next_frame() {
    let mut city = TestWorld::new();
    city.enter_city();
    city.tick(1);
    city.next_frame(FRAME);
    city.poll_status();
    assert_eq!(city.status().computations(), 1);

    city.settings_mut().speed_scalar = 3.0;
    city.tick(1);
    city.next_frame(FRAME);
    city.poll_status();
    assert_eq!(city.status().computations(), 2);
}
