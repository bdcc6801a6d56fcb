use crate::{waypoint::Waypoint, Point};

/// Command interface of the vehicle that flies a route.
///
/// Both calls block until the command is finished and return the time it
/// actually took.
pub trait VehicleControl {
    fn navigate_to(&mut self, target: Point) -> f64;
    /// Suppresses the fire or refills water at `waypoint`.
    fn perform_action(&mut self, waypoint: &Waypoint) -> f64;
}

impl<T: VehicleControl + ?Sized> VehicleControl for &mut T {
    fn navigate_to(&mut self, target: Point) -> f64 {
        (**self).navigate_to(target)
    }

    fn perform_action(&mut self, waypoint: &Waypoint) -> f64 {
        (**self).perform_action(waypoint)
    }
}
