use firetour_structs::{plan::Route, waypoint::Waypoint, FireId};
use log::trace;

use crate::{error::PlanError, world::World};

/// Water left below this is treated as empty.
const WATER_EPS: f64 = 1e-9;

/// Outcome of flying a path under a time budget.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub value: i64,
    pub time_used: f64,
    /// Prefix of the assessed path that fits in the budget.
    pub path: Vec<Waypoint>,
    /// True when the whole path fit.
    pub complete: bool,
}

impl Assessment {
    pub fn into_route(self, world: &World) -> Route {
        Route {
            home: world.home(),
            waypoints: self.path,
            value: self.value,
            time_used: self.time_used,
        }
    }
}

/// An order of fire visits. Water stops are added on demand when the tour is
/// assessed.
#[derive(Debug, Clone)]
pub struct Tour<'w> {
    world: &'w World,
    fires: Vec<FireId>,
}

impl<'w> Tour<'w> {
    /// Greedy seed: always fly to the closest unvisited fire. Water is ignored.
    pub fn nearest_neighbor(world: &'w World) -> Self {
        let mut set = world.remaining();
        let mut pos = world.home();
        let mut fires = Vec::with_capacity(set.len());
        while let Ok(closest) = world.nearest_fire(&set, &pos) {
            trace!("nearest neighbor: fire {} from {:?}", closest.id.0, pos);
            set.remove(closest.id);
            pos = closest.position;
            fires.push(closest.id);
        }
        Self { world, fires }
    }

    /// Priority seed: biggest fires first.
    pub fn largest_first(world: &'w World) -> Self {
        let mut set = world.remaining();
        let mut fires = Vec::with_capacity(set.len());
        while let Ok(largest) = world.largest_fire(&set) {
            trace!("largest first: fire {} area {:e}", largest.id.0, largest.area);
            set.remove(largest.id);
            fires.push(largest.id);
        }
        Self { world, fires }
    }

    /// Tour visiting `fires` in the given order, which must name every fire
    /// of the world exactly once.
    pub fn from_order(world: &'w World, fires: Vec<FireId>) -> Result<Self, PlanError> {
        let total = world.fires().len();
        let mut seen = vec![false; total];
        for id in fires.iter() {
            match seen.get_mut(id.0) {
                None => return Err(PlanError::UnknownFire(id.0)),
                Some(true) => return Err(PlanError::DuplicateFire(id.0)),
                Some(s) => *s = true,
            }
        }
        if fires.len() != total {
            return Err(PlanError::IncompleteOrder {
                visited: fires.len(),
                total,
            });
        }
        Ok(Self { world, fires })
    }

    pub fn world(&self) -> &'w World {
        self.world
    }

    pub fn fires(&self) -> &[FireId] {
        &self.fires
    }

    pub fn into_order(self) -> Vec<FireId> {
        self.fires
    }

    pub fn is_empty(&self) -> bool {
        self.fires.is_empty()
    }

    pub fn with_water(&self, water_capacity: f64) -> Result<Vec<Waypoint>, PlanError> {
        insert_water_stops(self.world, &self.fires, water_capacity)
    }

    /// Adds water stops and flies the result under `flight_time_budget`.
    pub fn assess(
        &self,
        flight_time_budget: f64,
        water_capacity: f64,
    ) -> Result<Assessment, PlanError> {
        let path = self.with_water(water_capacity)?;
        Ok(assess_path(
            self.world,
            &path,
            flight_time_budget,
            water_capacity,
        ))
    }
}

/// Interleaves refill stops into a fire-only path. A stop goes in front of
/// every fire that the remaining water cannot cover, at the water body
/// nearest to the previous position.
pub fn insert_water_stops(
    world: &World,
    fires: &[FireId],
    water_capacity: f64,
) -> Result<Vec<Waypoint>, PlanError> {
    let per_fire = world.config().water_per_fire;
    let mut path: Vec<Waypoint> = Vec::with_capacity(fires.len());
    let mut water = water_capacity;
    let mut pos = world.home();

    for id in fires.iter() {
        let fire = world.fire(*id).ok_or(PlanError::UnknownFire(id.0))?;
        let last_is_water = path.last().is_some_and(|w| w.is_water());
        if water + WATER_EPS < per_fire && !last_is_water {
            let refill = world.nearest_water(&pos)?;
            trace!(
                "refill at water {} before fire {} ({} left)",
                refill.source.0,
                id.0,
                water
            );
            water = refill.capacity;
            path.push(Waypoint::Water(refill));
        }
        water -= per_fire;
        pos = fire.position;
        path.push(Waypoint::from(fire));
    }

    Ok(path)
}

/// Flies `path` from home, stopping before the first waypoint that would
/// overrun the time budget or that needs water the vehicle does not have.
pub fn assess_path(
    world: &World,
    path: &[Waypoint],
    flight_time_budget: f64,
    water_capacity: f64,
) -> Assessment {
    let per_fire = world.config().water_per_fire;
    let mut pos = world.home();
    let mut elapsed = 0.0;
    let mut water = water_capacity;
    let mut value = 0;
    let mut flown = 0;

    for waypoint in path.iter() {
        let leg = world.travel_time(&pos, &waypoint.position()) + waypoint.dwell_time();
        if elapsed + leg > flight_time_budget {
            break;
        }
        match waypoint {
            Waypoint::Fire { .. } => {
                if water + WATER_EPS < per_fire {
                    break;
                }
                water -= per_fire;
            }
            Waypoint::Water(w) => water = w.capacity,
        }
        elapsed += leg;
        value += waypoint.value();
        pos = waypoint.position();
        flown += 1;
    }

    Assessment {
        value,
        time_used: elapsed,
        path: path[..flown].to_vec(),
        complete: flown == path.len(),
    }
}
