use firetour_structs::{plan::Route, problem::Problem};
use log::info;

pub mod anneal;
pub mod error;
pub mod tour;
pub mod world;


use anneal::{AnnealStats, Annealer};
use error::PlanError;
use tour::Tour;
use world::World;

#[derive(Debug)]
pub struct PlanSummary {
    pub route: Route,
    pub nearest_neighbor_value: i64,
    pub largest_first_value: i64,
    pub stats: AnnealStats,
}

/// Builds the world, seeds from the better of the two constructors, anneals
/// and returns the best flyable route.
pub fn plan(problem: &Problem) -> Result<PlanSummary, PlanError> {
    let world = World::from_problem(problem)?;
    let config = world.config();

    let nearest = Tour::nearest_neighbor(&world);
    let nearest_value = nearest
        .assess(config.flight_time_budget, config.water_capacity)?
        .value;
    let largest = Tour::largest_first(&world);
    let largest_value = largest
        .assess(config.flight_time_budget, config.water_capacity)?
        .value;
    info!(
        "seeds: nearest neighbor {}, largest first {}",
        nearest_value, largest_value
    );

    let seed = if largest_value > nearest_value {
        largest
    } else {
        nearest
    };

    let result = Annealer::from_config(config).run(seed)?;
    Ok(PlanSummary {
        route: result.best_assessment.into_route(&world),
        nearest_neighbor_value: nearest_value,
        largest_first_value: largest_value,
        stats: result.stats,
    })
}
