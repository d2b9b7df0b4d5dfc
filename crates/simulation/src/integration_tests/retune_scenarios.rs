use crate::requests::TuningRequest;
use crate::retune::RetuneMode;
use crate::settings::TuningSettings;
use crate::test_harness::TestWorld;
use crate::TickCounter;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_entering_city_doubles_bike_speed() {
    let mut city = TestWorld::new();
    let bike = city.light_prototype("Bicycle01", 20.0);
    city.enter_city();
    city.tick(1);

    assert!(close(city.max_speed_kmh(bike), 40.0));
    let car = city.car_data(bike);
    let soft = 2.0_f32.sqrt();
    assert!(close(car.acceleration, 2.0 * soft));
    assert!(close(car.braking, 4.0 * soft));
    assert_eq!(city.retune_outcome().passes, 1);
}

#[test]
fn test_nothing_runs_outside_a_city() {
    let mut city = TestWorld::new();
    let bike = city.light_prototype("Bicycle01", 20.0);
    city.send(TuningRequest::Apply);
    city.tick(3);
    assert!(close(city.max_speed_kmh(bike), 20.0));
    assert_eq!(city.resource::<TickCounter>().0, 0);
}

#[test]
fn test_reapply_with_same_settings_does_not_compound() {
    let mut city = TestWorld::new();
    let bike = city.light_prototype("Bicycle01", 20.0);
    city.enter_city();
    city.tick(1);
    city.send(TuningRequest::Apply);
    city.tick(1);
    city.send(TuningRequest::Apply);
    city.tick(1);

    assert!(close(city.max_speed_kmh(bike), 40.0));
    let outcome = city.retune_outcome();
    assert_eq!(outcome.passes, 3);
    assert_eq!(outcome.updated, 0);
}

#[test]
fn test_disabling_restores_every_baseline() {
    let mut city = TestWorld::new();
    let bike = city.light_prototype("Bicycle01", 20.0);
    let authored_sway = city.sway(bike);
    let path = city.path_prototype(18.0);
    let composition = city.composition(path);
    let authored_path = city.path_speed(path);
    {
        let mut settings = city.settings_mut();
        settings.stiffness_scalar = 2.0;
        settings.path_speed_scalar = 3.0;
    }
    city.enter_city();
    city.tick(1);
    assert!(close(city.max_speed_kmh(bike), 40.0));
    assert_ne!(city.sway(bike), authored_sway);
    assert!(close(city.path_speed(path), authored_path * 3.0));

    city.settings_mut().enabled = false;
    city.tick(1);

    assert!(close(city.max_speed_kmh(bike), 20.0));
    assert_eq!(city.sway(bike), authored_sway);
    assert!(close(city.path_speed(path), authored_path));
    assert!(close(city.composition_speed(composition), authored_path));
}

#[test]
fn test_restore_request_ignores_enabled_scalars() {
    let mut city = TestWorld::with_settings(TuningSettings {
        speed_scalar: 3.0,
        ..Default::default()
    });
    let bike = city.light_prototype("Bicycle01", 20.0);
    city.enter_city();
    city.tick(1);
    assert!(close(city.max_speed_kmh(bike), 60.0));

    city.send(TuningRequest::RestoreBaseline);
    city.tick(1);
    assert!(close(city.max_speed_kmh(bike), 20.0));
    assert_eq!(city.retune_outcome().mode, Some(RetuneMode::RestoreBaseline));
}

#[test]
fn test_out_of_range_scalar_is_clamped() {
    let mut city = TestWorld::with_settings(TuningSettings {
        speed_scalar: 0.1,
        ..Default::default()
    });
    let bike = city.light_prototype("Bicycle01", 20.0);
    city.enter_city();
    city.tick(1);
    assert!(close(city.max_speed_kmh(bike), 6.0));
}

#[test]
fn test_reset_to_vanilla_restores_authoring() {
    let mut city = TestWorld::new();
    let bike = city.light_prototype("Bicycle01", 20.0);
    city.enter_city();
    city.tick(1);

    city.settings_mut().reset_to_vanilla();
    city.send(TuningRequest::RestoreBaseline);
    city.tick(1);
    assert!(close(city.max_speed_kmh(bike), 20.0));
}

#[test]
fn test_report_after_restore_matches_live_values() {
    let mut city = TestWorld::with_settings(TuningSettings {
        speed_scalar: 3.0,
        stiffness_scalar: 2.0,
        path_speed_scalar: 1.5,
        ..Default::default()
    });
    city.light_prototype("Bicycle01", 20.0);
    let path = city.path_prototype(18.0);
    city.path_lanes(path, 3);
    city.enter_city();
    city.tick(1);

    city.send(TuningRequest::RestoreBaseline);
    city.tick(1);
    city.send(TuningRequest::DiagnosticReport);
    city.tick(1);

    let text = city.report_text().unwrap_or_default();
    // Settings still say 3x; the prototypes were put back to authored values.
    assert!(text.contains("Speed Scalar=3.00"), "{text}");
    assert!(text.contains("MismatchAny=0 "), "{text}");
    assert!(text.contains("Mismatch>5%=0"), "{text}");
}
