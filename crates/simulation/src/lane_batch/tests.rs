#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::collections::HashMap;

    use crate::baseline::Baselines;
    use crate::components::{
        CarLane, Edge, Overridden, Owner, PathwayAuthoring, PathwayData, PrefabData, PrefabRef,
        Road,
    };
    use crate::lane_batch::{
        begin_lane_batch, continue_lane_batch, DesiredSpeedCache, LaneBatchScheduler, LaneVisit,
    };
    use crate::log_once::WarnOnce;
    use crate::retune::RetuneOutcome;
    use crate::settings::{EffectiveScalars, TuningSettings};
    use crate::units::kmh_to_ms;

    fn ids(n: u32) -> Vec<Entity> {
        (0..n).map(Entity::from_raw).collect()
    }

    // -----------------------------------------------------------------------
    // Scheduler state machine
    // -----------------------------------------------------------------------

    #[test]
    fn test_drains_in_ceil_n_over_c_ticks() {
        let mut scheduler = LaneBatchScheduler::with_chunk_size(2048);
        scheduler.begin(ids(5000), 2.0);

        let mut per_tick = Vec::new();
        while scheduler.is_active() {
            per_tick.push(scheduler.continue_batch(|_, _, _| LaneVisit::Written));
        }
        assert_eq!(per_tick, vec![2048, 2048, 904]);
        assert_eq!(scheduler.stats.ticks, 3);
        assert_eq!(scheduler.stats.lanes_written, 5000);
        assert_eq!(scheduler.stats.runs_completed, 1);
    }

    #[test]
    fn test_each_lane_visited_exactly_once() {
        let mut scheduler = LaneBatchScheduler::with_chunk_size(7);
        scheduler.begin(ids(50), 1.5);
        let mut seen: HashMap<Entity, u32> = HashMap::new();
        while scheduler.is_active() {
            scheduler.continue_batch(|lane, _, _| {
                *seen.entry(lane).or_default() += 1;
                LaneVisit::Unchanged
            });
        }
        assert_eq!(seen.len(), 50);
        assert!(seen.values().all(|&n| n == 1));
    }

    #[test]
    fn test_new_run_supersedes_old_cursor() {
        let mut scheduler = LaneBatchScheduler::with_chunk_size(10);
        scheduler.begin(ids(30), 2.0);
        scheduler.continue_batch(|_, _, _| LaneVisit::Written);
        assert_eq!(scheduler.progress(), Some((20, 30)));

        scheduler.begin(ids(30), 3.0);
        assert_eq!(scheduler.stats.runs_superseded, 1);
        assert_eq!(scheduler.progress(), Some((30, 30)));

        // Every remaining visit sees only the new scalar.
        let mut scalars = Vec::new();
        while scheduler.is_active() {
            scheduler.continue_batch(|_, scalar, _| {
                scalars.push(scalar);
                LaneVisit::Written
            });
        }
        assert_eq!(scalars.len(), 30);
        assert!(scalars.iter().all(|&s| s == 3.0));
    }

    #[test]
    fn test_empty_snapshot_completes_immediately() {
        let mut scheduler = LaneBatchScheduler::default();
        scheduler.begin(Vec::new(), 2.0);
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.stats.runs_completed, 1);
        assert_eq!(scheduler.continue_batch(|_, _, _| LaneVisit::Written), 0);
    }

    #[test]
    fn test_begin_if_needed_only_on_change_or_force() {
        let mut scheduler = LaneBatchScheduler::default();
        assert!(scheduler.begin_if_needed(2.0, || ids(3)));
        assert!(!scheduler.begin_if_needed(2.0, || panic!("no snapshot without a change")));
        scheduler.request_force();
        assert!(scheduler.begin_if_needed(2.0, || ids(3)));
        assert!(scheduler.begin_if_needed(2.5, || ids(3)));
        assert_eq!(scheduler.applied_scalar(), Some(2.5));
    }

    #[test]
    fn test_reset_drops_run_and_keeps_counters() {
        let mut scheduler = LaneBatchScheduler::with_chunk_size(2);
        scheduler.begin(ids(5), 2.0);
        scheduler.continue_batch(|_, _, _| LaneVisit::Written);
        scheduler.reset();
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.applied_scalar(), None);
        assert_eq!(scheduler.stats.runs_superseded, 0);
        assert_eq!(scheduler.stats.lanes_written, 2);
        assert!(scheduler.needs_begin(2.0));
    }

    #[test]
    fn test_cache_computes_once_per_prototype() {
        let mut cache = DesiredSpeedCache::default();
        let proto = Entity::from_raw(99);
        let mut computed = 0;
        for _ in 0..5 {
            cache.get_or_compute(proto, || {
                computed += 1;
                Some(4.0)
            });
        }
        assert_eq!(computed, 1);
        assert_eq!(cache.misses(), 1);
        // Not-applicable results are cached too.
        assert_eq!(cache.get_or_compute(Entity::from_raw(100), || None), None);
        assert_eq!(cache.get_or_compute(Entity::from_raw(100), || Some(1.0)), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let scheduler = LaneBatchScheduler::with_chunk_size(0);
        assert_eq!(scheduler.chunk_size(), 1);
    }

    // -----------------------------------------------------------------------
    // Systems over a world
    // -----------------------------------------------------------------------

    struct PathWorld {
        world: World,
        schedule: Schedule,
    }

    impl PathWorld {
        fn new(chunk: usize, path_scalar: f32) -> Self {
            let mut world = World::new();
            world.insert_resource(TuningSettings::default());
            world.init_resource::<Baselines>();
            world.init_resource::<WarnOnce>();
            world.insert_resource(LaneBatchScheduler::with_chunk_size(chunk));
            world.insert_resource(RetuneOutcome {
                passes: 1,
                applied: EffectiveScalars {
                    path_speed: path_scalar,
                    ..EffectiveScalars::NEUTRAL
                },
                ..Default::default()
            });
            let mut schedule = Schedule::default();
            schedule.add_systems((begin_lane_batch, continue_lane_batch).chain());
            Self { world, schedule }
        }

        fn path_prototype(&mut self, kmh: f32) -> Entity {
            self.world
                .spawn((
                    PrefabData::named("Pedestrian Path"),
                    PathwayAuthoring {
                        speed_limit_kmh: kmh,
                    },
                    PathwayData {
                        speed_limit: kmh_to_ms(kmh),
                    },
                ))
                .id()
        }

        fn lane_on(&mut self, prototype: Entity, road: bool) -> Entity {
            let mut edge = self.world.spawn((Edge, PrefabRef(prototype)));
            if road {
                edge.insert(Road);
            }
            let edge = edge.id();
            let limit = kmh_to_ms(18.0);
            self.world
                .spawn((
                    CarLane {
                        speed_limit: limit,
                        default_speed_limit: limit,
                    },
                    Owner(edge),
                ))
                .id()
        }

        fn tick(&mut self) {
            self.schedule.run(&mut self.world);
        }

        fn lane(&self, lane: Entity) -> CarLane {
            *self.world.get::<CarLane>(lane).expect("lane")
        }
    }

    #[test]
    fn test_path_lanes_get_scaled_speed_and_roads_untouched() {
        let mut w = PathWorld::new(2048, 2.0);
        let path = w.path_prototype(18.0);
        let path_lane = w.lane_on(path, false);
        let road_lane = w.lane_on(path, true);

        w.tick();
        let lane = w.lane(path_lane);
        assert!((lane.speed_limit - 10.0).abs() < 1e-5);
        assert_eq!(lane.speed_limit, lane.default_speed_limit);
        assert_eq!(w.lane(road_lane).speed_limit, kmh_to_ms(18.0));
        assert!(!w.world.resource::<LaneBatchScheduler>().is_active());
    }

    #[test]
    fn test_overridden_edge_lanes_are_left_alone() {
        let mut w = PathWorld::new(2048, 2.0);
        let path = w.path_prototype(18.0);
        let kept = w.lane_on(path, false);
        let pinned = w.lane_on(path, false);
        let edge = w.world.get::<Owner>(pinned).expect("owner").0;
        w.world.entity_mut(edge).insert(Overridden);

        w.tick();
        assert!((w.lane(kept).speed_limit - 10.0).abs() < 1e-5);
        assert_eq!(w.lane(pinned).speed_limit, kmh_to_ms(18.0));
        let stats = &w.world.resource::<LaneBatchScheduler>().stats;
        assert_eq!(stats.lanes_written, 1);
        assert_eq!(stats.lanes_skipped, 0);
    }

    #[test]
    fn test_lanes_drain_across_ticks() {
        let mut w = PathWorld::new(4, 2.0);
        let path = w.path_prototype(18.0);
        let lanes: Vec<Entity> = (0..10).map(|_| w.lane_on(path, false)).collect();

        w.tick();
        assert_eq!(w.world.resource::<LaneBatchScheduler>().progress(), Some((6, 10)));
        w.tick();
        w.tick();
        assert!(!w.world.resource::<LaneBatchScheduler>().is_active());
        for lane in lanes {
            assert!((w.lane(lane).speed_limit - 10.0).abs() < 1e-5);
        }
        assert_eq!(w.world.resource::<LaneBatchScheduler>().stats.ticks, 3);
    }

    #[test]
    fn test_lane_losing_its_owner_mid_run_is_skipped() {
        let mut w = PathWorld::new(1, 2.0);
        let path = w.path_prototype(18.0);
        let first = w.lane_on(path, false);
        let second = w.lane_on(path, false);

        w.tick();
        // Whichever lane is still pending loses its edge.
        let pending = if w.lane(first).speed_limit > 9.0 { second } else { first };
        w.world.entity_mut(pending).insert(Owner(Entity::PLACEHOLDER));
        w.tick();

        assert_eq!(w.lane(pending).speed_limit, kmh_to_ms(18.0));
        let stats = &w.world.resource::<LaneBatchScheduler>().stats;
        assert_eq!(stats.lanes_skipped, 1);
        assert_eq!(stats.lanes_written, 1);
    }

    #[test]
    fn test_non_positive_path_speed_never_written() {
        let mut w = PathWorld::new(16, 3.0);
        let closed = w.path_prototype(0.0);
        let lane = w.lane_on(closed, false);
        w.tick();
        assert_eq!(w.lane(lane).speed_limit, kmh_to_ms(18.0));
    }

    #[test]
    fn test_no_run_before_first_retune_pass() {
        let mut w = PathWorld::new(16, 2.0);
        w.world.resource_mut::<RetuneOutcome>().passes = 0;
        let path = w.path_prototype(18.0);
        let lane = w.lane_on(path, false);
        w.tick();
        assert_eq!(w.lane(lane).speed_limit, kmh_to_ms(18.0));
        assert_eq!(w.world.resource::<LaneBatchScheduler>().stats.runs_started, 0);
    }
}
