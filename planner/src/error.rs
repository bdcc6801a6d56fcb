use firetour_structs::geometry::GeometryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// A fire query ran on an exhausted working set. Construction loops use
    /// this as their terminator.
    #[error("no fires remain in the working set")]
    EmptyFireSet,
    #[error("a water stop is needed but the world has no water sources")]
    NoWaterSource,
    #[error("fire {fire} has invalid geometry: {source}")]
    InvalidGeometry {
        fire: usize,
        #[source]
        source: GeometryError,
    },
    #[error("water source {0} has no usable location")]
    InvalidWaterSource(usize),
    #[error("fire {0} is not in the world")]
    UnknownFire(usize),
    #[error("fire {0} appears more than once in the visit order")]
    DuplicateFire(usize),
    #[error("visit order covers {visited} of {total} fires")]
    IncompleteOrder { visited: usize, total: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
