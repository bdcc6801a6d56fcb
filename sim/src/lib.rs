use firetour_structs::{backend::VehicleControl, waypoint::Waypoint, FireId, Point, WaterId};
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Navigate { to: Point, took: f64 },
    Suppress { fire: FireId, took: f64 },
    Refill { source: WaterId, took: f64 },
}

/// Point-mass vehicle with a fixed cruise speed. The slowdown factors scale
/// the time every command really takes, so the flight can fall behind the
/// plan.
pub struct SimVehicle {
    pub curr_loc: Point,
    pub curr_time: f64,
    pub velocity: f64,
    pub travel_slowdown: f64,
    pub action_slowdown: f64,
    pub commands: Vec<Command>,
}

impl SimVehicle {
    pub fn new(home: Point, velocity: f64) -> Self {
        Self {
            curr_loc: home,
            curr_time: 0.0,
            velocity,
            travel_slowdown: 1.0,
            action_slowdown: 1.0,
            commands: Vec::new(),
        }
    }

    pub fn with_travel_slowdown(mut self, factor: f64) -> Self {
        self.travel_slowdown = factor;
        self
    }

    pub fn with_action_slowdown(mut self, factor: f64) -> Self {
        self.action_slowdown = factor;
        self
    }
}

impl VehicleControl for SimVehicle {
    fn navigate_to(&mut self, target: Point) -> f64 {
        let took = self.curr_loc.dist(&target) / self.velocity * self.travel_slowdown;
        trace!(
            "t={:.2} fly ({:.5}, {:.5}) -> ({:.5}, {:.5}) in {:.2}",
            self.curr_time,
            self.curr_loc.x,
            self.curr_loc.y,
            target.x,
            target.y,
            took
        );
        self.curr_loc = target;
        self.curr_time += took;
        self.commands.push(Command::Navigate { to: target, took });
        took
    }

    fn perform_action(&mut self, waypoint: &Waypoint) -> f64 {
        let took = waypoint.dwell_time() * self.action_slowdown;
        self.curr_time += took;
        let command = match waypoint {
            Waypoint::Fire { fire, .. } => Command::Suppress { fire: *fire, took },
            Waypoint::Water(w) => Command::Refill {
                source: w.source,
                took,
            },
        };
        trace!("t={:.2} {:?}", self.curr_time, command);
        self.commands.push(command);
        took
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_take_scaled_time() {
        let mut v = SimVehicle::new(Point::new(0.0, 0.0), 2.0).with_travel_slowdown(1.5);
        let took = v.navigate_to(Point::new(3.0, 4.0));
        assert_eq!(took, 3.75);
        assert_eq!(v.curr_loc, Point::new(3.0, 4.0));

        let wp = Waypoint::Fire {
            fire: FireId(4),
            position: Point::new(3.0, 4.0),
            dwell_time: 6.0,
            value: 10,
        };
        let mut v = v.with_action_slowdown(0.5);
        assert_eq!(v.perform_action(&wp), 3.0);
        assert_eq!(v.curr_time, 6.75);
        assert_eq!(
            v.commands,
            vec![
                Command::Navigate {
                    to: Point::new(3.0, 4.0),
                    took: 3.75
                },
                Command::Suppress {
                    fire: FireId(4),
                    took: 3.0
                },
            ]
        );
    }
}
