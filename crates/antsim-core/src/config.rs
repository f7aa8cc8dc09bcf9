//! Configuration types for the simulation.

use crate::{ColonyId, Error, Result, Vec2, VisionCone};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the toroidal world
    pub width: f64,
    /// Height of the toroidal world
    pub height: f64,
    /// Fixed population of every colony
    pub ants_per_colony: usize,
    /// Number of food sources placed at startup
    pub food_sources: usize,
    /// Initial (and maximum) amount of every food source
    pub food_per_source: u32,
    /// Minimum distance between a food source and any colony
    pub min_food_colony_distance: f64,
    /// Food is placed at least this far from the world edges
    pub food_placement_margin: f64,
    /// Placement attempts before accepting a position that violates the distance rule
    pub max_placement_attempts: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            ants_per_colony: 50,
            food_sources: 20,
            food_per_source: 100,
            min_food_colony_distance: 100.0,
            food_placement_margin: 50.0,
            max_placement_attempts: 100,
        }
    }
}

impl WorldConfig {
    /// Home position of a colony; colonies sit at a quarter and three
    /// quarters of the width, vertically centered.
    pub fn colony_position(&self, colony: ColonyId) -> Vec2 {
        let x = match colony.index() {
            0 => self.width / 4.0,
            _ => 3.0 * self.width / 4.0,
        };
        Vec2::new(x, self.height / 2.0)
    }
}

/// Ant body and movement parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntConfig {
    /// Distance travelled every tick
    pub speed: f64,
    pub radius: f64,
    pub vision_range: f64,
    /// Total field of view (radians)
    pub vision_angle: f64,
    /// Heading change of a single turn action (radians)
    pub turn_angle: f64,
    /// Starting energy; carried but not consumed by any rule
    pub initial_energy: f64,
}

impl Default for AntConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            radius: 4.0,
            vision_range: 50.0,
            vision_angle: PI / 2.0,
            turn_angle: PI / 10.0,
            initial_energy: 100.0,
        }
    }
}

impl AntConfig {
    pub fn vision(&self) -> VisionCone {
        VisionCone::new(self.vision_range, self.vision_angle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    pub radius: f64,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self { radius: 20.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub radius: f64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self { radius: 6.0 }
    }
}

/// Pheromone store parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PheromoneConfig {
    /// Maximum number of live marks
    pub capacity: usize,
    /// Strength of a freshly deposited mark
    pub deposit_amount: f64,
    /// Strength lost by every mark on each decay pass
    pub evaporation_rate: f64,
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self {
            capacity: 5000,
            deposit_amount: 1.0,
            evaporation_rate: 0.001,
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Random seed for reproducibility; `None` seeds from the wall clock
    pub seed: Option<u64>,
    pub world: WorldConfig,
    pub ant: AntConfig,
    pub colony: ColonyConfig,
    pub food: FoodConfig,
    pub pheromone: PheromoneConfig,
}

impl SimConfig {
    /// Distance below which an ant picks up food
    pub fn pickup_threshold(&self) -> f64 {
        self.ant.radius + self.food.radius
    }

    /// Distance below which a carrying ant delivers to its colony
    pub fn delivery_threshold(&self) -> f64 {
        self.ant.radius + self.colony.radius
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check every parameter the engine relies on for its invariants
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        require_positive("world.width", world.width)?;
        require_positive("world.height", world.height)?;
        require_non_negative("world.min_food_colony_distance", world.min_food_colony_distance)?;
        require_non_negative("world.food_placement_margin", world.food_placement_margin)?;
        if world.max_placement_attempts == 0 {
            return Err(Error::Validation(
                "world.max_placement_attempts must be at least 1".to_string(),
            ));
        }
        if 2.0 * world.food_placement_margin > world.width
            || 2.0 * world.food_placement_margin > world.height
        {
            return Err(Error::Validation(format!(
                "world.food_placement_margin {} leaves no room in a {}x{} world",
                world.food_placement_margin, world.width, world.height
            )));
        }

        let ant = &self.ant;
        require_non_negative("ant.speed", ant.speed)?;
        require_non_negative("ant.radius", ant.radius)?;
        require_non_negative("ant.vision_range", ant.vision_range)?;
        require_non_negative("ant.turn_angle", ant.turn_angle)?;
        if !ant.initial_energy.is_finite() {
            return Err(Error::Validation(
                "ant.initial_energy must be finite".to_string(),
            ));
        }
        if !(ant.vision_angle > 0.0 && ant.vision_angle <= TAU) {
            return Err(Error::Validation(format!(
                "ant.vision_angle must be in (0, 2*PI], got {}",
                ant.vision_angle
            )));
        }

        require_non_negative("colony.radius", self.colony.radius)?;
        require_non_negative("food.radius", self.food.radius)?;

        let pheromone = &self.pheromone;
        if pheromone.capacity == 0 {
            return Err(Error::Validation(
                "pheromone.capacity must be at least 1".to_string(),
            ));
        }
        require_positive("pheromone.deposit_amount", pheromone.deposit_amount)?;
        require_non_negative("pheromone.evaporation_rate", pheromone.evaporation_rate)?;

        Ok(())
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "{} must be non-negative and finite, got {}",
            name, value
        )))
    }
}
