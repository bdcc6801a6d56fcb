use firetour_structs::{
    backend::VehicleControl, plan::Route, problem::MissionConfig, waypoint::Waypoint, Point,
};
use log::{debug, info, warn};

use crate::error::ResourceExhaustedError;

/// Water left below this is treated as empty.
const WATER_EPS: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
    /// Waypoints whose action finished inside the budget.
    pub completed: Vec<Waypoint>,
    pub value: i64,
    pub elapsed: f64,
    pub water_remaining: f64,
    /// Set when the replay stopped early.
    pub aborted: Option<ResourceExhaustedError>,
}

struct ExecutionState {
    pos: Point,
    elapsed: f64,
    water: f64,
    value: i64,
    completed: Vec<Waypoint>,
}

/// Flies a finished route on a vehicle, one blocking command at a time, and
/// keeps the same time and water books as route assessment.
pub struct Executive {
    velocity: f64,
    flight_time_budget: f64,
    water_capacity: f64,
    water_per_fire: f64,
}

impl Executive {
    pub fn new(config: &MissionConfig) -> Self {
        Self {
            velocity: config.velocity,
            flight_time_budget: config.flight_time_budget,
            water_capacity: config.water_capacity,
            water_per_fire: config.water_per_fire,
        }
    }

    fn check_time(&self, elapsed: f64) -> Result<(), ResourceExhaustedError> {
        if elapsed > self.flight_time_budget {
            Err(ResourceExhaustedError::FlightTime {
                elapsed,
                budget: self.flight_time_budget,
            })
        } else {
            Ok(())
        }
    }

    fn step(
        &self,
        state: &mut ExecutionState,
        waypoint: &Waypoint,
        vehicle: &mut dyn VehicleControl,
    ) -> Result<(), ResourceExhaustedError> {
        if !waypoint.is_water() && state.water + WATER_EPS < self.water_per_fire {
            return Err(ResourceExhaustedError::Water {
                needed: self.water_per_fire,
                remaining: state.water,
            });
        }

        let target = waypoint.position();
        let predicted_travel = state.pos.dist(&target) / self.velocity;
        self.check_time(state.elapsed + (predicted_travel + waypoint.dwell_time()))?;

        debug!("navigate to ({:.5}, {:.5})", target.x, target.y);
        state.elapsed += vehicle.navigate_to(target);
        state.pos = target;
        // Arrival may be late; do not start an action that cannot finish.
        self.check_time(state.elapsed + waypoint.dwell_time())?;

        debug!("perform {:?}", waypoint);
        state.elapsed += vehicle.perform_action(waypoint);
        self.check_time(state.elapsed)?;

        match waypoint {
            Waypoint::Fire { .. } => state.water -= self.water_per_fire,
            Waypoint::Water(w) => state.water = w.capacity,
        }
        state.value += waypoint.value();
        state.completed.push(*waypoint);
        Ok(())
    }

    /// Replays `route` on `vehicle`. Running out of time or water stops the
    /// replay and is reported together with what was achieved so far.
    pub fn replay(&self, route: &Route, vehicle: &mut dyn VehicleControl) -> ExecutionReport {
        let mut state = ExecutionState {
            pos: route.home,
            elapsed: 0.0,
            water: self.water_capacity,
            value: 0,
            completed: Vec::with_capacity(route.waypoints.len()),
        };

        let mut aborted = None;
        for (idx, waypoint) in route.waypoints.iter().enumerate() {
            if let Err(e) = self.step(&mut state, waypoint, vehicle) {
                warn!(
                    "aborting replay at waypoint {} of {}: {}",
                    idx,
                    route.waypoints.len(),
                    e
                );
                aborted = Some(e);
                break;
            }
        }

        info!(
            "replay finished: {} of {} waypoints, value {}, time {:.2}",
            state.completed.len(),
            route.waypoints.len(),
            state.value,
            state.elapsed
        );

        ExecutionReport {
            completed: state.completed,
            value: state.value,
            elapsed: state.elapsed,
            water_remaining: state.water,
            aborted,
        }
    }
}
