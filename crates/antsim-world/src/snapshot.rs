//! Owned, read-only copy of the world state for renderers and reports.

use crate::world::World;
use antsim_core::{ColonyId, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonyView {
    pub id: ColonyId,
    pub position: Vec2,
    pub food_collected: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntView {
    pub colony: ColonyId,
    pub position: Vec2,
    pub heading: f64,
    pub carrying_food: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodView {
    pub position: Vec2,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PheromoneView {
    pub position: Vec2,
    pub strength: f64,
    pub colony: ColonyId,
}

/// Everything a frame renderer needs, detached from the live world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub iteration: u64,
    pub time_elapsed: f64,
    pub colonies: Vec<ColonyView>,
    /// Colony 0 ants first, in update order
    pub ants: Vec<AntView>,
    pub food_sources: Vec<FoodView>,
    /// In store order; decay removals swap the last mark into the freed slot
    pub pheromones: Vec<PheromoneView>,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        let colonies = world
            .colonies()
            .iter()
            .map(|colony| ColonyView {
                id: colony.id,
                position: colony.position,
                food_collected: colony.food_collected(),
            })
            .collect();

        let ants = world
            .all_ants()
            .map(|ant| AntView {
                colony: ant.colony,
                position: ant.position,
                heading: ant.heading,
                carrying_food: ant.carrying_food,
            })
            .collect();

        let food_sources = world
            .food_sources()
            .iter()
            .map(|food| FoodView {
                position: food.position,
                remaining: food.amount(),
            })
            .collect();

        let pheromones = world
            .pheromones()
            .iter()
            .map(|mark| PheromoneView {
                position: mark.position,
                strength: mark.strength,
                colony: mark.colony,
            })
            .collect();

        Self {
            iteration: world.iteration(),
            time_elapsed: world.time_elapsed(),
            colonies,
            ants,
            food_sources,
            pheromones,
        }
    }

    /// Ants of one colony, in update order
    pub fn ants_of(&self, colony: ColonyId) -> impl Iterator<Item = &AntView> + '_ {
        self.ants.iter().filter(move |ant| ant.colony == colony)
    }

    pub fn to_json(&self) -> antsim_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
