//! Headless episode runner: step a world for a fixed number of frames.

use crate::snapshot::WorldSnapshot;
use crate::world::World;
use antsim_core::{Error, Result, SimConfig, SimulationStats};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// How long to run and how to pace each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    pub ticks: u64,
    /// Time delta handed to every step
    pub frame_dt: f64,
    /// End early once every food source is empty
    pub stop_when_exhausted: bool,
    /// Ticks between periodic metric events; 0 disables them
    pub log_interval: u64,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            ticks: 10_000,
            frame_dt: 1.0 / 60.0,
            stop_when_exhausted: true,
            log_interval: 1000,
        }
    }
}

impl EpisodeConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.frame_dt.is_finite() || self.frame_dt < 0.0 {
            return Err(Error::Validation(format!(
                "frame_dt must be finite and non-negative, got {}",
                self.frame_dt
            )));
        }
        Ok(())
    }
}

/// Outcome of a finished episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeResult {
    pub seed: u64,
    pub ticks_run: u64,
    pub exhausted: bool,
    pub stats: SimulationStats,
    pub snapshot: WorldSnapshot,
}

pub struct Episode {
    world: World,
    config: EpisodeConfig,
}

impl Episode {
    pub fn new(sim_config: SimConfig, config: EpisodeConfig) -> Result<Self> {
        config.validate()?;
        let world = World::new(sim_config)?;
        Ok(Self { world, config })
    }

    /// Wrap an already prepared world
    pub fn with_world(world: World, config: EpisodeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { world, config })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    #[instrument(skip(self), fields(seed = self.world.seed(), ticks = self.config.ticks))]
    pub fn run(&mut self) -> EpisodeResult {
        info!(
            event = "episode_start",
            frame_dt = self.config.frame_dt,
            stop_when_exhausted = self.config.stop_when_exhausted,
            "Starting episode for {} ticks",
            self.config.ticks
        );

        let mut ticks_run = 0;
        let mut exhausted = self.world.is_exhausted();

        while ticks_run < self.config.ticks {
            if exhausted && self.config.stop_when_exhausted {
                break;
            }

            self.world.step(self.config.frame_dt);
            ticks_run += 1;
            exhausted = self.world.is_exhausted();

            if self.config.log_interval > 0 && ticks_run % self.config.log_interval == 0 {
                self.emit_metrics();
            }
        }

        let stats = self.world.stats();
        info!(
            event = "episode_summary",
            ticks_run,
            exhausted,
            total_food_collected = stats.total_food_collected(),
            food_remaining = stats.food_remaining,
            live_pheromones = stats.live_pheromones,
            leader = ?stats.leader(),
            "Episode complete"
        );

        EpisodeResult {
            seed: self.world.seed(),
            ticks_run,
            exhausted,
            stats,
            snapshot: self.world.snapshot(),
        }
    }

    fn emit_metrics(&self) {
        let stats = self.world.stats();
        for colony in &stats.colonies {
            debug!(
                event = "colony_metrics",
                iteration = stats.iteration,
                colony = %colony.colony_id,
                food_collected = colony.food_collected,
                ants_carrying = colony.ants_carrying,
                carrying_ratio = colony.carrying_ratio(),
                pheromone_marks = colony.pheromone_marks,
                "Colony metrics"
            );
        }
        debug!(
            event = "world_metrics",
            iteration = stats.iteration,
            food_remaining = stats.food_remaining,
            live_pheromones = stats.live_pheromones,
            "World metrics"
        );
    }
}
