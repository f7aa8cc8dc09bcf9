//! Owned simulation state and the per-tick stepper.

use crate::entities::{Ant, Colony, FoodSource};
use crate::pheromone::PheromoneStore;
use crate::snapshot::WorldSnapshot;
use antsim_core::{ColonyId, ColonyStats, Result, SimConfig, SimulationStats, Vec2, WorldConfig};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, trace, warn};

/// The whole simulation: colonies, their ants, food and pheromones
pub struct World {
    pub(crate) config: SimConfig,
    pub(crate) colonies: Vec<Colony>,
    /// Indexed by colony id, then ant index
    pub(crate) ants: Vec<Vec<Ant>>,
    pub(crate) food_sources: Vec<FoodSource>,
    pub(crate) pheromones: PheromoneStore,
    pub(crate) rng: ChaCha8Rng,
    seed: u64,
    time_elapsed: f64,
    iteration: u64,
}

impl World {
    /// Build the initial world; seeds from the wall clock when the config has no seed
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(wall_clock_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let colonies: Vec<Colony> = ColonyId::ALL
            .iter()
            .map(|&id| {
                Colony::new(
                    id,
                    config.world.colony_position(id),
                    config.world.ants_per_colony,
                )
            })
            .collect();

        let ants: Vec<Vec<Ant>> = colonies
            .iter()
            .map(|colony| {
                (0..config.world.ants_per_colony)
                    .map(|_| {
                        Ant::new(
                            colony.id,
                            colony.position,
                            rng.gen_range(0.0..TAU),
                            config.ant.initial_energy,
                        )
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let food_sources = place_food(&config.world, &colonies, &mut rng);
        let pheromones = PheromoneStore::new(&config.pheromone);

        info!(
            seed,
            width = config.world.width,
            height = config.world.height,
            ants_per_colony = config.world.ants_per_colony,
            food_sources = food_sources.len(),
            "World created"
        );

        Ok(Self {
            config,
            colonies,
            ants,
            food_sources,
            pheromones,
            rng,
            seed,
            time_elapsed: 0.0,
            iteration: 0,
        })
    }

    /// Advance one tick: every ant of colony 0, then every ant of colony 1,
    /// then a single global pheromone decay pass.
    pub fn step(&mut self, dt: f64) {
        self.time_elapsed += dt;
        self.iteration += 1;

        for colony in ColonyId::ALL {
            for index in 0..self.ants[colony.index()].len() {
                self.update_ant(colony, index);
            }
        }

        let evaporated = self.pheromones.decay();
        if evaporated > 0 {
            trace!(
                iteration = self.iteration,
                evaporated,
                live = self.pheromones.len(),
                "Pheromone marks evaporated"
            );
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Seed actually used, including a wall-clock one
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn time_elapsed(&self) -> f64 {
        self.time_elapsed
    }

    pub fn colonies(&self) -> &[Colony] {
        &self.colonies
    }

    pub fn colony(&self, colony: ColonyId) -> &Colony {
        &self.colonies[colony.index()]
    }

    pub fn ants(&self, colony: ColonyId) -> &[Ant] {
        &self.ants[colony.index()]
    }

    /// Every ant in update order
    pub fn all_ants(&self) -> impl Iterator<Item = &Ant> + '_ {
        self.ants.iter().flatten()
    }

    pub fn ant_mut(&mut self, colony: ColonyId, index: usize) -> Option<&mut Ant> {
        self.ants.get_mut(colony.index())?.get_mut(index)
    }

    pub fn food_sources(&self) -> &[FoodSource] {
        &self.food_sources
    }

    /// Swap in a hand-placed set of food sources
    pub fn replace_food_sources(&mut self, food_sources: Vec<FoodSource>) {
        self.food_sources = food_sources;
    }

    pub fn pheromones(&self) -> &PheromoneStore {
        &self.pheromones
    }

    pub fn pheromones_mut(&mut self) -> &mut PheromoneStore {
        &mut self.pheromones
    }

    /// True once every food source has been emptied
    pub fn is_exhausted(&self) -> bool {
        self.food_sources.iter().all(FoodSource::is_depleted)
    }

    pub fn stats(&self) -> SimulationStats {
        let colonies = self
            .colonies
            .iter()
            .map(|colony| ColonyStats {
                food_collected: colony.food_collected(),
                ants_alive: colony.ants_alive(),
                ants_carrying: self
                    .ants(colony.id)
                    .iter()
                    .filter(|ant| ant.carrying_food)
                    .count(),
                pheromone_marks: self.pheromones.count_for(colony.id),
                ..ColonyStats::new(colony.id)
            })
            .collect();

        SimulationStats {
            iteration: self.iteration,
            time_elapsed: self.time_elapsed,
            colonies,
            food_remaining: self.food_sources.iter().map(|f| f.amount() as u64).sum(),
            live_pheromones: self.pheromones.len(),
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(self)
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Scatter food sources away from the colonies, best effort
fn place_food(config: &WorldConfig, colonies: &[Colony], rng: &mut ChaCha8Rng) -> Vec<FoodSource> {
    let margin = config.food_placement_margin;
    let mut food_sources = Vec::with_capacity(config.food_sources);

    for index in 0..config.food_sources {
        let mut position = Vec2::ZERO;
        let mut valid = false;
        let mut attempts = 0;

        while !valid && attempts < config.max_placement_attempts {
            position = Vec2::new(
                rng.gen_range(margin..=config.width - margin),
                rng.gen_range(margin..=config.height - margin),
            );
            valid = colonies
                .iter()
                .all(|colony| position.distance(colony.position) >= config.min_food_colony_distance);
            attempts += 1;
        }

        if !valid {
            warn!(
                food_index = index,
                attempts,
                x = position.x,
                y = position.y,
                "Could not find a food position away from the colonies, placing anyway"
            );
        }

        food_sources.push(FoodSource::new(position, config.food_per_source));
    }

    food_sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use antsim_core::NUM_COLONIES;
    use std::f64::consts::PI;

    fn seeded(seed: u64) -> SimConfig {
        SimConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_world_creation() {
        let world = World::new(seeded(42)).unwrap();

        assert_eq!(world.seed(), 42);
        assert_eq!(world.colonies().len(), NUM_COLONIES);
        assert_eq!(world.food_sources().len(), 20);
        assert!(world.pheromones().is_empty());
        assert_eq!(world.iteration(), 0);

        for colony in world.colonies() {
            let ants = world.ants(colony.id);
            assert_eq!(ants.len(), 50);
            assert_eq!(colony.ants_alive(), 50);
            assert!(ants.iter().all(|a| a.position == colony.position));
            assert!(ants.iter().all(|a| a.colony == colony.id));
            assert!(ants.iter().all(|a| a.heading > -PI && a.heading <= PI));
            assert!(ants.iter().all(|a| !a.carrying_food && a.energy == 100.0));
        }
    }

    #[test]
    fn test_food_placed_away_from_colonies() {
        let world = World::new(seeded(7)).unwrap();
        let config = world.config().world.clone();

        for food in world.food_sources() {
            assert_eq!(food.amount(), 100);
            assert!(food.position.x >= 50.0 && food.position.x <= 750.0);
            assert!(food.position.y >= 50.0 && food.position.y <= 550.0);
            for colony in world.colonies() {
                assert!(food.position.distance(colony.position) >= config.min_food_colony_distance);
            }
        }
    }

    #[test]
    fn test_impossible_placement_is_not_fatal() {
        let mut config = seeded(3);
        config.world.min_food_colony_distance = 10_000.0;
        config.world.max_placement_attempts = 3;

        let world = World::new(config).unwrap();
        assert_eq!(world.food_sources().len(), 20);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = seeded(1);
        config.pheromone.capacity = 0;
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_wall_clock_seed_is_recorded() {
        let world = World::new(SimConfig::default()).unwrap();
        let mut replay_config = SimConfig::default();
        replay_config.seed = Some(world.seed());
        let replay = World::new(replay_config).unwrap();

        assert_eq!(world.snapshot(), replay.snapshot());
    }

    #[test]
    fn test_step_advances_counters() {
        let mut world = World::new(seeded(11)).unwrap();
        world.step(0.5);
        world.step(0.25);

        assert_eq!(world.iteration(), 2);
        assert_eq!(world.time_elapsed(), 0.75);
    }

    #[test]
    fn test_invariants_hold_over_many_ticks() {
        let mut world = World::new(seeded(5)).unwrap();
        let (width, height) = (world.config().world.width, world.config().world.height);
        let deposit = world.pheromones().deposit_amount();
        let capacity = world.pheromones().capacity();
        assert_eq!(deposit, world.config().pheromone.deposit_amount);
        assert_eq!(capacity, world.config().pheromone.capacity);
        let mut previous_food: Vec<u32> = world.food_sources().iter().map(|f| f.amount()).collect();
        let mut previous_collected: Vec<u64> =
            world.colonies().iter().map(|c| c.food_collected()).collect();

        for _ in 0..2000 {
            world.step(1.0 / 60.0);

            for ant in world.all_ants() {
                assert!(ant.heading > -PI && ant.heading <= PI);
                assert!(ant.position.x >= 0.0 && ant.position.x <= width);
                assert!(ant.position.y >= 0.0 && ant.position.y <= height);
            }

            assert!(world.pheromones().len() <= capacity);
            assert!(world
                .pheromones()
                .iter()
                .all(|m| m.strength > 0.0 && m.strength <= deposit));

            for (food, previous) in world.food_sources().iter().zip(previous_food.iter_mut()) {
                assert!(food.amount() <= *previous);
                assert!(food.amount() <= food.capacity());
                *previous = food.amount();
            }

            for (colony, previous) in world.colonies().iter().zip(previous_collected.iter_mut()) {
                assert!(colony.food_collected() >= *previous);
                *previous = colony.food_collected();
            }
        }
    }

    #[test]
    fn test_stats_and_exhaustion() {
        let mut world = World::new(seeded(9)).unwrap();
        let stats = world.stats();
        assert_eq!(stats.food_remaining, 20 * 100);
        assert_eq!(stats.total_food_collected(), 0);
        assert_eq!(stats.colonies.len(), NUM_COLONIES);
        assert!(!world.is_exhausted());

        world.replace_food_sources(Vec::new());
        assert!(world.is_exhausted());
        assert_eq!(world.stats().food_remaining, 0);
    }
}
