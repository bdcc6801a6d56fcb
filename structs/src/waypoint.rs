use serde::{Deserialize, Serialize};

use crate::{
    geometry::{GeometryError, Polygon},
    FireId, Point, WaterId,
};

/// Area below which a fire counts as extinguished.
pub const TARGET_AREA: f64 = 1e-8;
/// Fixed transit and command delay spent at every fire.
pub const BASE_DELAY: f64 = 5.0;
/// Per-step area retention factor of the suppression model.
pub const DECAY_BASE: f64 = 0.95;
/// Decay steps per time unit.
pub const DECAY_RATE: f64 = 5.189;
/// Multiplier turning suppressed area into integer reward units.
pub const VALUE_SCALE: f64 = 1e10;

/// A burning area. Decay is `area(t) = area0 * DECAY_BASE^(DECAY_RATE * t)`
/// where `t` is the time spent suppressing, after the base delay.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Fire {
    pub id: FireId,
    pub polygon: Polygon,
    pub position: Point,
    pub area: f64,
    pub dwell_time: f64,
    pub value: i64,
}

impl Fire {
    pub fn new(id: FireId, polygon: Polygon) -> Result<Self, GeometryError> {
        polygon.validate()?;
        let area = polygon.area();
        let position = polygon.centroid();
        let dwell_time = Self::dwell_time_for(area, TARGET_AREA);
        let value = Self::suppressed_value(area, dwell_time);
        Ok(Fire {
            id,
            polygon,
            position,
            area,
            dwell_time,
            value,
        })
    }

    /// Closed-form time to bring `area` down to `target`, plus the base delay.
    pub fn dwell_time_for(area: f64, target: f64) -> f64 {
        let mut time = BASE_DELAY;
        if area >= target {
            time += (target / area).ln() / DECAY_BASE.ln() / DECAY_RATE;
        }
        time
    }

    /// Area left after suppressing for `duration` (base delay included).
    pub fn area_after(&self, duration: f64) -> f64 {
        let suppressing = (duration - BASE_DELAY).max(0.0);
        self.area * DECAY_BASE.powf(DECAY_RATE * suppressing)
    }

    /// Reward for staying `duration` at this fire.
    pub fn value_after(&self, duration: f64) -> i64 {
        Self::suppressed_value(self.area, duration)
    }

    fn suppressed_value(area: f64, duration: f64) -> i64 {
        let suppressing = (duration - BASE_DELAY).max(0.0);
        let remaining = area * DECAY_BASE.powf(DECAY_RATE * suppressing);
        ((area - remaining) * VALUE_SCALE).round() as i64
    }
}

/// A refill stop. `capacity` is the water level after refilling.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Water {
    pub source: WaterId,
    pub position: Point,
    pub refill_time: f64,
    pub capacity: f64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum Waypoint {
    Fire {
        fire: FireId,
        position: Point,
        dwell_time: f64,
        value: i64,
    },
    Water(Water),
}

impl Waypoint {
    pub fn position(&self) -> Point {
        match self {
            Waypoint::Fire { position, .. } => *position,
            Waypoint::Water(w) => w.position,
        }
    }

    pub fn dwell_time(&self) -> f64 {
        match self {
            Waypoint::Fire { dwell_time, .. } => *dwell_time,
            Waypoint::Water(w) => w.refill_time,
        }
    }

    /// Reward collected when the stop completes. Zero for water.
    pub fn value(&self) -> i64 {
        match self {
            Waypoint::Fire { value, .. } => *value,
            Waypoint::Water(_) => 0,
        }
    }

    pub fn fire(&self) -> Option<FireId> {
        match self {
            Waypoint::Fire { fire, .. } => Some(*fire),
            Waypoint::Water(_) => None,
        }
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Waypoint::Water(_))
    }
}

impl From<&Fire> for Waypoint {
    fn from(f: &Fire) -> Self {
        Waypoint::Fire {
            fire: f.id,
            position: f.position,
            dwell_time: f.dwell_time,
            value: f.value,
        }
    }
}

impl From<Water> for Waypoint {
    fn from(w: Water) -> Self {
        Waypoint::Water(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_fire(area: f64) -> Fire {
        let h = area.sqrt() / 2.0;
        let polygon = Polygon::new(vec![
            Point::new(-h, -h),
            Point::new(h, -h),
            Point::new(h, h),
            Point::new(-h, h),
        ]);
        Fire::new(FireId(0), polygon).unwrap()
    }

    #[test]
    fn dwell_time_matches_closed_form() {
        let fire = square_fire(1e-7);
        let expected = BASE_DELAY + (0.1f64).ln() / (0.95f64).ln() / 5.189;
        assert_relative_eq!(fire.dwell_time, expected, max_relative = 1e-6);
        assert_relative_eq!(fire.area_after(fire.dwell_time), TARGET_AREA, max_relative = 1e-6);
        assert_eq!(fire.value, 900);
    }

    #[test]
    fn small_fire_needs_only_base_delay() {
        let fire = square_fire(5e-9);
        assert_eq!(fire.dwell_time, BASE_DELAY);
        assert_eq!(fire.value, 0);
    }

    #[test]
    fn value_grows_with_dwell_time() {
        let fire = square_fire(2e-8);
        assert_eq!(fire.value_after(BASE_DELAY), 0);
        let mut last = 0;
        let steps = 20;
        for i in 0..=steps {
            let t = BASE_DELAY + (fire.dwell_time - BASE_DELAY) * i as f64 / steps as f64;
            let v = fire.value_after(t);
            assert!(v >= last);
            last = v;
        }
        assert_eq!(last, fire.value);
        assert!(fire.dwell_time >= BASE_DELAY);
    }

    #[test]
    fn fire_at_target_area_is_worth_nothing() {
        let area = TARGET_AREA;
        assert_eq!(Fire::dwell_time_for(area, TARGET_AREA), BASE_DELAY);
        assert_eq!(Fire::suppressed_value(area, BASE_DELAY), 0);
    }

    #[test]
    fn degenerate_polygon_is_not_a_fire() {
        let flat = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ]);
        assert!(Fire::new(FireId(3), flat).is_err());
    }
}
