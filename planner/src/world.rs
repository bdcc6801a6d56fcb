use firetour_structs::{
    geometry::Polygon,
    problem::{MissionConfig, Problem},
    waypoint::{Fire, Water},
    FireId, Point, WaterId,
};
use log::debug;
use ordered_float::OrderedFloat;

use crate::error::PlanError;

/// Fires not yet placed in a route, in insertion order.
///
/// Every construction pass works on its own copy; the world itself is never
/// mutated after it is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FireSet {
    remaining: Vec<FireId>,
}

impl FireSet {
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn contains(&self, id: FireId) -> bool {
        self.remaining.contains(&id)
    }

    /// Removes `id`, keeping the order of the others. Returns false if absent.
    pub fn remove(&mut self, id: FireId) -> bool {
        match self.remaining.iter().position(|f| *f == id) {
            Some(i) => {
                self.remaining.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = FireId> + '_ {
        self.remaining.iter().copied()
    }
}

/// Map of the mission: home base, fires and water bodies, plus the travel
/// model used to time every leg.
#[derive(Debug, Clone)]
pub struct World {
    home: Point,
    config: MissionConfig,
    fires: Vec<Fire>,
    water_bodies: Vec<Polygon>,
}

impl World {
    pub fn new(
        home: Point,
        fires: Vec<Vec<Point>>,
        water_bodies: Vec<Vec<Point>>,
        config: MissionConfig,
    ) -> Result<Self, PlanError> {
        config.validate().map_err(PlanError::InvalidConfig)?;
        if !home.is_finite() {
            return Err(PlanError::InvalidConfig("home is not finite".to_string()));
        }

        let fires = fires
            .into_iter()
            .enumerate()
            .map(|(i, ring)| {
                Fire::new(FireId(i), Polygon::new(ring))
                    .map_err(|source| PlanError::InvalidGeometry { fire: i, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let water_bodies = water_bodies
            .into_iter()
            .enumerate()
            .map(|(i, ring)| {
                if ring.is_empty() || ring.iter().any(|p| !p.is_finite()) {
                    Err(PlanError::InvalidWaterSource(i))
                } else {
                    Ok(Polygon::new(ring))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "world with {} fires, {} water bodies, total fire value {}",
            fires.len(),
            water_bodies.len(),
            fires.iter().map(|f| f.value).sum::<i64>()
        );

        Ok(Self {
            home,
            config,
            fires,
            water_bodies,
        })
    }

    pub fn from_problem(problem: &Problem) -> Result<Self, PlanError> {
        Self::new(
            problem.home,
            problem.fires.clone(),
            problem.water_sources.clone(),
            problem.config.clone(),
        )
    }

    pub fn home(&self) -> Point {
        self.home
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn fires(&self) -> &[Fire] {
        &self.fires
    }

    pub fn fire(&self, id: FireId) -> Option<&Fire> {
        self.fires.get(id.0)
    }

    pub fn water_bodies(&self) -> &[Polygon] {
        &self.water_bodies
    }

    /// A fresh working set holding every fire.
    pub fn remaining(&self) -> FireSet {
        FireSet {
            remaining: self.fires.iter().map(|f| f.id).collect(),
        }
    }

    pub fn travel_time(&self, p1: &Point, p2: &Point) -> f64 {
        p1.dist(p2) / self.config.velocity
    }

    /// Closest remaining fire by travel time. Ties go to the earlier fire.
    pub fn nearest_fire(&self, set: &FireSet, position: &Point) -> Result<&Fire, PlanError> {
        set.iter()
            .filter_map(|id| self.fire(id))
            .min_by_key(|f| OrderedFloat(self.travel_time(position, &f.position)))
            .ok_or(PlanError::EmptyFireSet)
    }

    /// Remaining fire with the largest area. Ties go to the earlier fire.
    pub fn largest_fire(&self, set: &FireSet) -> Result<&Fire, PlanError> {
        set.iter()
            .filter_map(|id| self.fire(id))
            .min_by_key(|f| std::cmp::Reverse(OrderedFloat(f.area)))
            .ok_or(PlanError::EmptyFireSet)
    }

    /// Refill stop at the closest point of the nearest water body.
    pub fn nearest_water(&self, position: &Point) -> Result<Water, PlanError> {
        let (source, point) = self
            .water_bodies
            .iter()
            .enumerate()
            .filter_map(|(i, body)| body.closest_point(position).map(|p| (i, p)))
            .min_by_key(|(_, p)| OrderedFloat(self.travel_time(position, p)))
            .ok_or(PlanError::NoWaterSource)?;

        Ok(Water {
            source: WaterId(source),
            position: point,
            refill_time: self.config.refill_time,
            capacity: self.config.refill_amount(),
        })
    }
}
