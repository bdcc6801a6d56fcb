use firetour_structs::{
    problem::{Cooling, MissionConfig},
    FireId,
};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    error::PlanError,
    tour::{Assessment, Tour},
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnnealStats {
    pub iterations: usize,
    pub accepted: usize,
    pub improved: usize,
    pub final_temperature: f64,
}

#[derive(Debug, Clone)]
pub struct AnnealResult<'w> {
    pub best: Tour<'w>,
    pub best_assessment: Assessment,
    pub stats: AnnealStats,
}

/// Swaps two distinct, uniformly chosen positions. Orders shorter than two
/// are returned unchanged.
pub fn neighbor<R: Rng>(order: &[FireId], rng: &mut R) -> Vec<FireId> {
    let mut next = order.to_vec();
    let n = next.len();
    if n < 2 {
        return next;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    next.swap(i, j);
    next
}

/// Metropolis test on value: gains and ties always pass, a loss of `-delta`
/// passes with probability `exp(delta / temperature)`.
pub fn accept<R: Rng>(delta_value: i64, temperature: f64, rng: &mut R) -> bool {
    if delta_value >= 0 {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    let p = (delta_value as f64 / temperature).exp();
    rng.random::<f64>() < p
}

/// Simulated annealing over fire visit orders with the 2-swap move.
pub struct Annealer<R: Rng> {
    initial_temperature: f64,
    iteration_count: usize,
    cooling: Cooling,
    flight_time_budget: f64,
    water_capacity: f64,
    rng: R,
}

impl Annealer<ChaCha8Rng> {
    /// Annealer seeded from `config.seed`.
    pub fn from_config(config: &MissionConfig) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> Annealer<R> {
    pub fn new(config: &MissionConfig, rng: R) -> Self {
        Self {
            initial_temperature: config.initial_temperature,
            iteration_count: config.iteration_count,
            cooling: config.cooling,
            flight_time_budget: config.flight_time_budget,
            water_capacity: config.water_capacity,
            rng,
        }
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iteration_count = n;
        self
    }

    pub fn with_cooling(mut self, cooling: Cooling) -> Self {
        self.cooling = cooling;
        self
    }

    /// Temperature used in iteration `k` (0-based).
    pub fn temperature(&self, k: usize) -> f64 {
        match self.cooling {
            Cooling::Geometric { factor } => self.initial_temperature * factor.powf(k as f64),
            Cooling::Linear { step } => (self.initial_temperature - k as f64 * step).max(0.0),
        }
    }

    /// Runs the fixed iteration budget from `seed` and returns the best tour
    /// seen. The accepted state may get worse; the result never does.
    pub fn run<'w>(&mut self, seed: Tour<'w>) -> Result<AnnealResult<'w>, PlanError> {
        let world = seed.world();
        let mut best_assessment = seed.assess(self.flight_time_budget, self.water_capacity)?;
        let mut current_value = best_assessment.value;
        let mut best = seed.clone();
        let mut current = seed.into_order();

        debug!("anneal start value {}", current_value);

        let mut stats = AnnealStats::default();
        for k in 0..self.iteration_count {
            let temperature = self.temperature(k);
            let candidate = Tour::from_order(world, neighbor(&current, &mut self.rng))?;
            let assessment = candidate.assess(self.flight_time_budget, self.water_capacity)?;

            stats.iterations += 1;
            stats.final_temperature = temperature;

            if !accept(assessment.value - current_value, temperature, &mut self.rng) {
                continue;
            }
            stats.accepted += 1;
            current_value = assessment.value;

            if assessment.value > best_assessment.value {
                debug!(
                    "anneal iter {} temp {:.4} new best {} (was {})",
                    k, temperature, assessment.value, best_assessment.value
                );
                stats.improved += 1;
                best_assessment = assessment;
                best = candidate.clone();
            }
            current = candidate.into_order();
        }

        info!(
            "anneal finished: {} iterations, {} accepted, {} improved, best value {}",
            stats.iterations, stats.accepted, stats.improved, best_assessment.value
        );

        Ok(AnnealResult {
            best,
            best_assessment,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<FireId> {
        (0..n).map(FireId).collect()
    }

    #[test]
    fn neighbor_swaps_exactly_two_positions() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let order = ids(6);
        for _ in 0..100 {
            let next = neighbor(&order, &mut rng);
            let moved = order.iter().zip(next.iter()).filter(|(a, b)| a != b).count();
            assert_eq!(moved, 2);
            let mut sorted = next.clone();
            sorted.sort();
            assert_eq!(sorted, order);
        }
    }

    #[test]
    fn neighbor_of_short_order_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(neighbor(&ids(1), &mut rng), ids(1));
        assert!(neighbor(&[], &mut rng).is_empty());
    }

    #[test]
    fn acceptance_rules() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(accept(0, 1.0, &mut rng));
        assert!(accept(5, 0.0, &mut rng));
        assert!(!accept(-1, 0.0, &mut rng));
        // exp(-1e6) underflows to zero.
        assert!(!accept(-1_000_000, 1.0, &mut rng));

        let trials = 10_000;
        let hits = (0..trials).filter(|_| accept(-1, 1.0, &mut rng)).count();
        let p = hits as f64 / trials as f64;
        assert!((p - (-1.0f64).exp()).abs() < 0.03, "p = {}", p);
    }

    #[test]
    fn cooling_schedules() {
        let config = MissionConfig {
            initial_temperature: 10.0,
            iteration_count: 4,
            ..Default::default()
        };
        let rng = ChaCha8Rng::seed_from_u64(0);
        let geo = Annealer::new(&config, rng).with_cooling(Cooling::Geometric { factor: 0.5 });
        assert_eq!(geo.temperature(0), 10.0);
        assert_eq!(geo.temperature(2), 2.5);

        let lin = geo.with_cooling(Cooling::Linear { step: 2.5 });
        assert_eq!(lin.temperature(0), 10.0);
        assert_eq!(lin.temperature(2), 5.0);
        assert_eq!(lin.temperature(4), 0.0);
        assert_eq!(lin.temperature(9), 0.0);

        // Neither schedule depends on the iteration count.
        let longer = lin.with_iterations(400);
        assert_eq!(longer.temperature(2), 5.0);
        let geo = longer.with_cooling(Cooling::Geometric { factor: 0.5 });
        assert_eq!(geo.temperature(2), 2.5);
        assert!(geo.temperature(usize::MAX) >= 0.0);
    }
}
