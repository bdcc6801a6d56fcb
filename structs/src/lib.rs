use serde::{Deserialize, Serialize};

pub mod backend;
pub mod geometry;
pub mod plan;
pub mod problem;
pub mod waypoint;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dist(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Index of a fire in the world model's fire list.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FireId(pub usize);

/// Index of a water body in the world model's water list.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WaterId(pub usize);
