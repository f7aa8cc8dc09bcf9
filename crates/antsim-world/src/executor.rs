//! Per-ant update: decide, act, resolve food interactions, then move.

use crate::entities::Ant;
use crate::perception::Perception;
use crate::policy::{Action, PolicyKind};
use crate::world::World;
use antsim_core::ColonyId;
use tracing::{debug, trace};

impl World {
    /// Run the full update for one ant. The order of the stages is part of
    /// the observable behavior: pickup sees the position before this tick's
    /// movement, and a pickup can be delivered within the same update.
    pub(crate) fn update_ant(&mut self, colony: ColonyId, index: usize) {
        let mut ant = self.ants[colony.index()][index];

        let action = {
            let senses = Perception::new(
                &ant,
                self.config.ant.vision(),
                &self.colonies,
                &self.food_sources,
                &self.pheromones,
            );
            PolicyKind::for_colony(colony).decide(&ant, &senses, &mut self.rng)
        };

        self.apply_action(&mut ant, action);

        if !ant.carrying_food {
            self.try_pickup(&mut ant, index);
        }

        if ant.carrying_food {
            self.try_deliver(&mut ant, index);
        }

        let world = &self.config.world;
        ant.advance(self.config.ant.speed, world.width, world.height);

        self.ants[colony.index()][index] = ant;
    }

    fn apply_action(&mut self, ant: &mut Ant, action: Action) {
        match action {
            // Translation happens for every action later in the update
            Action::MoveForward => {}
            Action::TurnLeft => ant.turn_left(self.config.ant.turn_angle),
            Action::TurnRight => ant.turn_right(self.config.ant.turn_angle),
            Action::DropPheromone => {
                self.pheromones.deposit(ant.position, ant.colony);
            }
        }
    }

    /// First non-empty source in range wins
    fn try_pickup(&mut self, ant: &mut Ant, index: usize) {
        let threshold = self.config.pickup_threshold();

        let claimed = self.food_sources.iter_mut().enumerate().find(|(_, food)| {
            !food.is_depleted() && ant.position.distance(food.position) < threshold
        });

        if let Some((food_index, food)) = claimed {
            if food.take_one() {
                ant.carrying_food = true;
                trace!(
                    colony = %ant.colony,
                    ant = index,
                    food_index,
                    remaining = food.amount(),
                    "Ant picked up food"
                );
            }
        }
    }

    fn try_deliver(&mut self, ant: &mut Ant, index: usize) {
        let threshold = self.config.delivery_threshold();
        let iteration = self.iteration();
        let colony = &mut self.colonies[ant.colony.index()];
        if ant.position.distance(colony.position) >= threshold {
            return;
        }

        ant.carrying_food = false;
        colony.record_delivery();
        debug!(
            colony = %ant.colony,
            ant = index,
            food_collected = colony.food_collected(),
            iteration,
            "Food delivered"
        );

        // Returning foragers mark the nest entrance
        self.pheromones.deposit(ant.position, ant.colony);
    }
}
