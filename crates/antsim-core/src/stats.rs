//! Foraging statistics tracking for colonies.

use crate::ColonyId;
use serde::{Deserialize, Serialize};

/// Foraging statistics for a single colony
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColonyStats {
    pub colony_id: ColonyId,
    /// Food units delivered home so far
    pub food_collected: u64,
    /// Size of the fixed population
    pub ants_alive: usize,
    /// Ants currently on their way home with food
    pub ants_carrying: usize,
    /// Live pheromone marks owned by the colony
    pub pheromone_marks: usize,
}

impl ColonyStats {
    pub fn new(colony_id: ColonyId) -> Self {
        Self {
            colony_id,
            food_collected: 0,
            ants_alive: 0,
            ants_carrying: 0,
            pheromone_marks: 0,
        }
    }

    /// Fraction of the population currently carrying food
    pub fn carrying_ratio(&self) -> f64 {
        if self.ants_alive == 0 {
            0.0
        } else {
            self.ants_carrying as f64 / self.ants_alive as f64
        }
    }
}

/// Whole-world statistics at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub iteration: u64,
    pub time_elapsed: f64,
    pub colonies: Vec<ColonyStats>,
    /// Food units still available across all sources
    pub food_remaining: u64,
    pub live_pheromones: usize,
}

impl SimulationStats {
    /// Sum of food delivered by every colony
    pub fn total_food_collected(&self) -> u64 {
        self.colonies.iter().map(|c| c.food_collected).sum()
    }

    pub fn colony(&self, colony: ColonyId) -> Option<&ColonyStats> {
        self.colonies.get(colony.index())
    }

    /// Colony with strictly the most food collected, `None` on a tie
    pub fn leader(&self) -> Option<ColonyId> {
        let best = self.colonies.iter().map(|c| c.food_collected).max()?;
        let mut leaders = self.colonies.iter().filter(|c| c.food_collected == best);
        let leader = leaders.next()?;
        if leaders.next().is_some() {
            return None;
        }
        Some(leader.colony_id)
    }
}
