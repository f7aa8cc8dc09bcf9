//! What a single ant can sense of the world around it.

use crate::entities::{Ant, Colony, FoodSource};
use crate::pheromone::PheromoneStore;
use antsim_core::{Vec2, VisionCone};

/// Sensory queries a decision policy may make
pub trait Senses {
    /// Displacement from the ant to the closest visible non-empty food source
    fn nearest_visible_food(&self) -> Option<Vec2>;

    /// Absolute bearing to the best-scoring visible own-colony pheromone mark
    fn strongest_visible_pheromone(&self) -> Option<f64>;

    /// Absolute bearing to the ant's home colony, known regardless of vision
    fn home_bearing(&self) -> f64;
}

/// Read-only view of the world from one ant's position and heading.
///
/// Queries are evaluated lazily, so a policy only pays for what it asks.
pub struct Perception<'a> {
    ant: &'a Ant,
    vision: VisionCone,
    colonies: &'a [Colony],
    food_sources: &'a [FoodSource],
    pheromones: &'a PheromoneStore,
}

impl<'a> Perception<'a> {
    pub fn new(
        ant: &'a Ant,
        vision: VisionCone,
        colonies: &'a [Colony],
        food_sources: &'a [FoodSource],
        pheromones: &'a PheromoneStore,
    ) -> Self {
        Self {
            ant,
            vision,
            colonies,
            food_sources,
            pheromones,
        }
    }

    fn can_see(&self, target: Vec2) -> bool {
        self.vision
            .contains(self.ant.position, self.ant.heading, target)
    }
}

impl Senses for Perception<'_> {
    fn nearest_visible_food(&self) -> Option<Vec2> {
        let mut nearest: Option<(f64, Vec2)> = None;

        for food in self.food_sources.iter().filter(|f| !f.is_depleted()) {
            if !self.can_see(food.position) {
                continue;
            }

            let delta = food.position - self.ant.position;
            let distance_squared = delta.length_squared();
            // Ties keep the earlier source
            if nearest.map_or(true, |(best, _)| distance_squared < best) {
                nearest = Some((distance_squared, delta));
            }
        }

        nearest.map(|(_, delta)| delta)
    }

    fn strongest_visible_pheromone(&self) -> Option<f64> {
        let mut strongest_score = 0.0;
        let mut bearing = None;

        for mark in self.pheromones.iter_colony(self.ant.colony) {
            if !self.can_see(mark.position) {
                continue;
            }

            let delta = mark.position - self.ant.position;
            let score = mark.strength / (delta.length_squared() + 1.0);
            if score > strongest_score {
                strongest_score = score;
                bearing = Some(delta.angle());
            }
        }

        bearing
    }

    fn home_bearing(&self) -> f64 {
        // Colony ids index the colony array directly
        let home = self.colonies[self.ant.colony.index()].position;
        (home - self.ant.position).angle()
    }
}
