use approx::assert_relative_eq;
use firetour_planner::{tour::Tour, world::World};
use firetour_sim::{Command, SimVehicle};
use firetour_structs::{
    plan::Route,
    problem::{MissionConfig, DEFAULT_HOME},
    waypoint::Waypoint,
    Point,
};

use crate::{error::ResourceExhaustedError, executive::Executive};

fn square(center: Point, area: f64) -> Vec<Point> {
    let h = area.sqrt() / 2.0;
    vec![
        Point::new(center.x - h, center.y - h),
        Point::new(center.x + h, center.y - h),
        Point::new(center.x + h, center.y + h),
        Point::new(center.x - h, center.y + h),
    ]
}

fn offset(dx: f64, dy: f64) -> Point {
    Point::new(DEFAULT_HOME.x + dx, DEFAULT_HOME.y + dy)
}

fn config() -> MissionConfig {
    MissionConfig {
        flight_time_budget: 1000.0,
        water_capacity: 2.0,
        ..Default::default()
    }
}

fn world(config: MissionConfig) -> World {
    World::new(
        DEFAULT_HOME,
        vec![
            square(offset(0.01, 0.0), 2e-8),
            square(offset(0.0, 0.02), 5e-9),
            square(offset(-0.03, 0.0), 1e-7),
        ],
        vec![vec![offset(0.0, -0.005)]],
        config,
    )
    .unwrap()
}

fn planned_route(world: &World) -> Route {
    let config = world.config();
    Tour::nearest_neighbor(world)
        .assess(config.flight_time_budget, config.water_capacity)
        .unwrap()
        .into_route(world)
}

#[test]
fn faithful_vehicle_matches_plan() {
    let _ = env_logger::try_init();
    let world = world(config());
    let route = planned_route(&world);
    assert_eq!(route.waypoints.len(), 4);
    assert_eq!(route.water_count(), 1);
    assert_eq!(route.fire_count(), 3);
    assert_eq!(route.value, 1000);

    let mut vehicle = SimVehicle::new(DEFAULT_HOME, world.config().velocity);
    let report = Executive::new(world.config()).replay(&route, &mut vehicle);

    assert_eq!(report.aborted, None);
    assert_eq!(report.completed, route.waypoints);
    assert_eq!(report.value, route.value);
    assert_relative_eq!(report.elapsed, route.time_used, max_relative = 1e-9);
    assert_eq!(report.water_remaining, 1.0);

    assert_eq!(vehicle.commands.len(), 2 * route.waypoints.len());
    for (pair, waypoint) in vehicle.commands.chunks(2).zip(route.waypoints.iter()) {
        assert!(matches!(pair[0], Command::Navigate { to, .. } if to == waypoint.position()));
        match waypoint {
            Waypoint::Fire { fire, .. } => {
                assert!(matches!(pair[1], Command::Suppress { fire: f, .. } if f == *fire))
            }
            Waypoint::Water(w) => {
                assert!(matches!(pair[1], Command::Refill { source, .. } if source == w.source))
            }
        }
    }
}

#[test]
fn slow_vehicle_stops_before_the_ceiling() {
    let _ = env_logger::try_init();
    let world = world(config());
    let route = planned_route(&world);

    let mut vehicle =
        SimVehicle::new(DEFAULT_HOME, world.config().velocity).with_travel_slowdown(2.0);
    let report = Executive::new(world.config()).replay(&route, &mut vehicle);

    assert!(matches!(
        report.aborted,
        Some(ResourceExhaustedError::FlightTime { budget, .. }) if budget == 1000.0
    ));
    assert_eq!(report.completed, route.waypoints[..3].to_vec());
    assert_eq!(report.value, 100);
    assert!(report.value < route.value);
    assert!(report.elapsed <= 1000.0);
}

#[test]
fn late_arrival_skips_the_action() {
    let world = world(config());
    let route = planned_route(&world);

    let mut vehicle =
        SimVehicle::new(DEFAULT_HOME, world.config().velocity).with_travel_slowdown(100.0);
    let report = Executive::new(world.config()).replay(&route, &mut vehicle);

    assert!(matches!(
        report.aborted,
        Some(ResourceExhaustedError::FlightTime { .. })
    ));
    assert!(report.completed.is_empty());
    assert_eq!(report.value, 0);
    assert_eq!(vehicle.commands.len(), 1);
}

#[test]
fn missing_refill_aborts_on_water() {
    let config = MissionConfig {
        water_capacity: 1.0,
        ..config()
    };
    let world = world(config);
    let planned = planned_route(&world);
    let route = Route {
        waypoints: planned
            .waypoints
            .iter()
            .filter(|w| !w.is_water())
            .copied()
            .collect(),
        ..planned
    };

    let mut vehicle = SimVehicle::new(DEFAULT_HOME, world.config().velocity);
    let report = Executive::new(world.config()).replay(&route, &mut vehicle);

    assert_eq!(
        report.aborted,
        Some(ResourceExhaustedError::Water {
            needed: 1.0,
            remaining: 0.0
        })
    );
    assert_eq!(report.completed.len(), 1);
    assert_eq!(report.value, 100);
    assert_eq!(vehicle.commands.len(), 2);
}

#[test]
fn overrunning_action_earns_nothing() {
    let world = world(config());
    let route = planned_route(&world);
    let first = route.waypoints[0];
    assert_eq!(first.value(), 100);

    // The first fire's suppression is stretched well past the ceiling.
    let mut vehicle =
        SimVehicle::new(DEFAULT_HOME, world.config().velocity).with_action_slowdown(200.0);
    let report = Executive::new(world.config()).replay(&route, &mut vehicle);

    assert!(matches!(
        report.aborted,
        Some(ResourceExhaustedError::FlightTime { elapsed, budget })
            if budget == 1000.0 && elapsed > budget
    ));
    assert!(report.completed.is_empty());
    assert_eq!(report.value, 0);
    assert_eq!(report.water_remaining, 2.0);
    assert_eq!(vehicle.commands.len(), 2);
    assert!(matches!(
        vehicle.commands[1],
        Command::Suppress { fire, .. } if Some(fire) == first.fire()
    ));
}
