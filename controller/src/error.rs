use thiserror::Error;

/// Why a replay stopped before the end of the route.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ResourceExhaustedError {
    #[error("flight time exhausted: {elapsed:.2} exceeds budget {budget:.2}")]
    FlightTime { elapsed: f64, budget: f64 },
    #[error("out of water: {needed} needed, {remaining} left")]
    Water { needed: f64, remaining: f64 },
}
