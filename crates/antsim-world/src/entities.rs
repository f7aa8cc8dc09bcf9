//! Ant, colony and food source state.

use antsim_core::{wrap_angle, ColonyId, Vec2};
use serde::{Deserialize, Serialize};

/// A forager belonging to one colony
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ant {
    pub position: Vec2,
    /// Radians, kept in `(-PI, PI]`
    pub heading: f64,
    pub colony: ColonyId,
    pub carrying_food: bool,
    /// Not consumed by any current rule
    pub energy: f64,
}

impl Ant {
    pub fn new(colony: ColonyId, position: Vec2, heading: f64, energy: f64) -> Self {
        Self {
            position,
            heading: wrap_angle(heading),
            colony,
            carrying_food: false,
            energy,
        }
    }

    pub fn turn_left(&mut self, angle: f64) {
        self.heading = wrap_angle(self.heading - angle);
    }

    pub fn turn_right(&mut self, angle: f64) {
        self.heading = wrap_angle(self.heading + angle);
    }

    /// Move `distance` along the current heading, then wrap around the world edges
    pub fn advance(&mut self, distance: f64, width: f64, height: f64) {
        self.position += Vec2::from_angle(self.heading) * distance;
        self.position = self.position.wrap(width, height);
    }
}

/// A colony nest and its running tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    pub id: ColonyId,
    pub position: Vec2,
    food_collected: u64,
    ants_alive: usize,
}

impl Colony {
    pub fn new(id: ColonyId, position: Vec2, ants_alive: usize) -> Self {
        Self {
            id,
            position,
            food_collected: 0,
            ants_alive,
        }
    }

    pub fn food_collected(&self) -> u64 {
        self.food_collected
    }

    /// Never decreases; no rule currently removes ants
    pub fn ants_alive(&self) -> usize {
        self.ants_alive
    }

    pub fn record_delivery(&mut self) {
        self.food_collected += 1;
    }
}

/// A finite, non-replenishing pile of food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSource {
    pub position: Vec2,
    amount: u32,
    capacity: u32,
}

impl FoodSource {
    pub fn new(position: Vec2, capacity: u32) -> Self {
        Self {
            position,
            amount: capacity,
            capacity,
        }
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_depleted(&self) -> bool {
        self.amount == 0
    }

    /// Remove one unit; returns false if nothing was left
    pub fn take_one(&mut self) -> bool {
        if self.amount == 0 {
            return false;
        }
        self.amount -= 1;
        true
    }
}
