use serde::{Deserialize, Serialize};

use crate::{waypoint::Waypoint, Point};

/// A flyable route: the stops in visit order, starting from `home`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub home: Point,
    pub waypoints: Vec<Waypoint>,
    pub value: i64,
    pub time_used: f64,
}

impl Route {
    pub fn fire_count(&self) -> usize {
        self.waypoints.iter().filter(|w| !w.is_water()).count()
    }

    pub fn water_count(&self) -> usize {
        self.waypoints.iter().filter(|w| w.is_water()).count()
    }

    pub fn print(&self) {
        println!(
            "route from ({:.5}, {:.5}) value {} time {:.2}, {} fires, {} water stops",
            self.home.x,
            self.home.y,
            self.value,
            self.time_used,
            self.fire_count(),
            self.water_count()
        );
        for w in self.waypoints.iter() {
            match w {
                Waypoint::Fire {
                    fire,
                    position,
                    dwell_time,
                    value,
                } => println!(
                    "  - fire {:>3} at ({:.5}, {:.5}) dwell {:.2} value {}",
                    fire.0, position.x, position.y, dwell_time, value
                ),
                Waypoint::Water(water) => println!(
                    "  - water {:>2} at ({:.5}, {:.5}) refill {:.2} to {}",
                    water.source.0,
                    water.position.x,
                    water.position.y,
                    water.refill_time,
                    water.capacity
                ),
            }
        }
    }
}
