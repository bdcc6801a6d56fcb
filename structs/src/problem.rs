use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Point;

pub const DEFAULT_HOME: Point = Point {
    x: -70.6185,
    y: 42.98575,
};

/// Empirical cruise speed in map units per time unit.
pub const DEFAULT_VELOCITY: f64 = 1.1976737e-4;

#[derive(Debug, Error)]
pub enum ProblemLoadError {
    #[error("could not read problem file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse problem: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Cooling {
    /// `T_k = T_0 * factor^k`
    Geometric { factor: f64 },
    /// `T_k = max(T_0 - k * step, 0)`
    Linear { step: f64 },
}

impl Default for Cooling {
    fn default() -> Self {
        Cooling::Geometric { factor: 0.99 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MissionConfig {
    pub velocity: f64,
    pub flight_time_budget: f64,
    pub water_capacity: f64,
    pub water_per_fire: f64,
    pub refill_time: f64,
    pub refill_amount: Option<f64>,
    pub initial_temperature: f64,
    pub iteration_count: usize,
    pub cooling: Cooling,
    pub seed: u64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_VELOCITY,
            flight_time_budget: 1200.0,
            water_capacity: 1.0,
            water_per_fire: 1.0,
            refill_time: 5.0,
            refill_amount: None,
            initial_temperature: 20.0,
            iteration_count: 500,
            cooling: Cooling::default(),
            seed: 0,
        }
    }
}

impl MissionConfig {
    pub fn refill_amount(&self) -> f64 {
        self.refill_amount.unwrap_or(self.water_capacity)
    }

    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        fn positive(name: &str, v: f64) -> Result<(), String> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(format!("{} must be positive and finite, got {}", name, v))
            }
        }

        positive("velocity", self.velocity)?;
        positive("flight_time_budget", self.flight_time_budget)?;
        positive("water_capacity", self.water_capacity)?;
        positive("initial_temperature", self.initial_temperature)?;
        if !(self.water_per_fire.is_finite() && self.water_per_fire >= 0.0) {
            return Err(format!(
                "water_per_fire must be non-negative, got {}",
                self.water_per_fire
            ));
        }
        if !(self.refill_time.is_finite() && self.refill_time >= 0.0) {
            return Err(format!(
                "refill_time must be non-negative, got {}",
                self.refill_time
            ));
        }
        if self.iteration_count == 0 {
            return Err("iteration_count must be at least 1".to_string());
        }
        match self.cooling {
            Cooling::Geometric { factor } if !(factor > 0.0 && factor <= 1.0) => {
                return Err(format!("cooling factor must be in (0, 1], got {}", factor));
            }
            Cooling::Linear { step } if !(step.is_finite() && step >= 0.0) => {
                return Err(format!("cooling step must be non-negative, got {}", step));
            }
            _ => {}
        }
        let refill = self.refill_amount();
        if !refill.is_finite() || refill < self.water_per_fire {
            return Err(format!(
                "refill_amount {} cannot cover one fire ({})",
                refill, self.water_per_fire
            ));
        }
        Ok(())
    }
}

fn default_home() -> Point {
    DEFAULT_HOME
}

/// Already-parsed mission geometry. Fires are polygon rings; water sources are
/// rings too, where a single vertex stands for a point source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default = "default_home")]
    pub home: Point,
    pub fires: Vec<Vec<Point>>,
    #[serde(default)]
    pub water_sources: Vec<Vec<Point>>,
    #[serde(default)]
    pub config: MissionConfig,
}

impl Problem {
    pub fn from_json_str(s: &str) -> Result<Self, ProblemLoadError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProblemLoadError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }
}
