//! Bounded, decaying store of colony pheromone marks.

use antsim_core::{ColonyId, PheromoneConfig, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::trace;

/// A single decaying point of chemical signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PheromoneMark {
    pub position: Vec2,
    pub strength: f64,
    pub colony: ColonyId,
    /// Decay passes survived so far
    age: u64,
}

impl PheromoneMark {
    pub fn age(&self) -> u64 {
        self.age
    }
}

/// Pheromone marks of every colony, capped at a fixed capacity.
///
/// Insertion evicts from the front (oldest inserted), while decay removes
/// expired marks by swapping in the last element. After a decay pass has
/// removed something, the front is therefore no longer guaranteed to be the
/// oldest mark.
#[derive(Debug, Clone)]
pub struct PheromoneStore {
    marks: VecDeque<PheromoneMark>,
    capacity: usize,
    deposit_amount: f64,
    evaporation_rate: f64,
    /// Decay passes after which an undisturbed mark is gone
    lifetime: u64,
}

impl PheromoneStore {
    pub fn new(config: &PheromoneConfig) -> Self {
        Self {
            marks: VecDeque::with_capacity(config.capacity),
            capacity: config.capacity,
            deposit_amount: config.deposit_amount,
            evaporation_rate: config.evaporation_rate,
            lifetime: lifetime_passes(config.deposit_amount, config.evaporation_rate),
        }
    }

    /// Add a full-strength mark, returning the mark evicted to make room
    pub fn deposit(&mut self, position: Vec2, colony: ColonyId) -> Option<PheromoneMark> {
        let evicted = if self.marks.len() >= self.capacity {
            self.marks.pop_front()
        } else {
            None
        };

        if let Some(old) = &evicted {
            trace!(
                colony = %old.colony,
                strength = old.strength,
                "Pheromone store full, evicted front mark"
            );
        }

        self.marks.push_back(PheromoneMark {
            position,
            strength: self.deposit_amount,
            colony,
            age: 0,
        });

        evicted
    }

    /// Evaporate every mark once and drop the ones that ran out.
    ///
    /// A mark expires on its `ceil(deposit / rate)`-th pass. Counting passes
    /// keeps that exact where repeated subtraction would leave a rounding
    /// residue just above zero.
    ///
    /// Returns the number of marks removed.
    pub fn decay(&mut self) -> usize {
        let mut removed = 0;
        let mut i = 0;

        while i < self.marks.len() {
            let mark = &mut self.marks[i];
            mark.strength -= self.evaporation_rate;
            mark.age += 1;

            if mark.age >= self.lifetime || mark.strength <= 0.0 {
                // The former last mark now sits at `i` and still needs its pass
                self.marks.swap_remove_back(i);
                removed += 1;
            } else {
                i += 1;
            }
        }

        removed
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn deposit_amount(&self) -> f64 {
        self.deposit_amount
    }

    /// Decay passes an undisturbed mark survives, `u64::MAX` when nothing evaporates
    pub fn lifetime(&self) -> u64 {
        self.lifetime
    }

    /// Live marks in store order
    pub fn iter(&self) -> impl Iterator<Item = &PheromoneMark> + '_ {
        self.marks.iter()
    }

    /// Live marks owned by `colony`
    pub fn iter_colony(&self, colony: ColonyId) -> impl Iterator<Item = &PheromoneMark> + '_ {
        self.marks.iter().filter(move |mark| mark.colony == colony)
    }

    pub fn count_for(&self, colony: ColonyId) -> usize {
        self.iter_colony(colony).count()
    }
}

fn lifetime_passes(deposit_amount: f64, evaporation_rate: f64) -> u64 {
    if evaporation_rate <= 0.0 {
        return u64::MAX;
    }
    // Float to int casts saturate
    (deposit_amount / evaporation_rate).ceil() as u64
}
