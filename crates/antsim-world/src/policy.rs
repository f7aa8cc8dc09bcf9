//! Hand-specified decision policies that pick one action per ant per tick.

use crate::entities::Ant;
use crate::perception::Senses;
use antsim_core::{wrap_angle, ColonyId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Angular error (radians) within which an ant counts as facing its target
pub const STEERING_TOLERANCE: f64 = 0.1;

/// The single action an ant takes on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    TurnLeft,
    TurnRight,
    DropPheromone,
}

/// Probabilities that distinguish one policy from another
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyParams {
    /// Drop a mark while heading home already facing the colony
    pub drop_returning: f64,
    /// Try following the strongest visible own-colony mark
    pub follow_pheromone: f64,
    /// Random-walk trials, checked in this order
    pub drop_random: f64,
    pub turn_left: f64,
    pub turn_right: f64,
}

/// Named decision strategy; every colony is governed by exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    /// Leans heavily on existing trails
    Aggressive,
    /// Wanders more and follows trails less often
    Exploratory,
}

const AGGRESSIVE: PolicyParams = PolicyParams {
    drop_returning: 1.0 / 20.0,
    follow_pheromone: 0.80,
    drop_random: 0.10,
    turn_left: 0.25,
    turn_right: 0.25,
};

const EXPLORATORY: PolicyParams = PolicyParams {
    drop_returning: 1.0 / 10.0,
    follow_pheromone: 0.40,
    drop_random: 0.05,
    turn_left: 0.40,
    turn_right: 0.40,
};

impl PolicyKind {
    /// Colony 0 forages aggressively, colony 1 explores
    pub fn for_colony(colony: ColonyId) -> Self {
        match colony.index() {
            0 => PolicyKind::Aggressive,
            _ => PolicyKind::Exploratory,
        }
    }

    pub fn params(self) -> &'static PolicyParams {
        match self {
            PolicyKind::Aggressive => &AGGRESSIVE,
            PolicyKind::Exploratory => &EXPLORATORY,
        }
    }

    /// Choose the next action for `ant`
    pub fn decide<S, R>(self, ant: &Ant, senses: &S, rng: &mut R) -> Action
    where
        S: Senses + ?Sized,
        R: Rng + ?Sized,
    {
        let params = self.params();

        if ant.carrying_food {
            if let Some(turn) = steer_toward(senses.home_bearing(), ant.heading) {
                return turn;
            }
            return if rng.gen_bool(params.drop_returning) {
                Action::DropPheromone
            } else {
                Action::MoveForward
            };
        }

        // A zero displacement is indistinguishable from seeing nothing
        if let Some(food) = senses.nearest_visible_food().filter(|d| !d.is_zero()) {
            return steer_toward(food.angle(), ant.heading).unwrap_or(Action::MoveForward);
        }

        if rng.gen_bool(params.follow_pheromone) {
            // A bearing of exactly -1 rad reads as no trail found
            if let Some(bearing) = senses
                .strongest_visible_pheromone()
                .filter(|&b| b != NO_TRAIL_BEARING)
            {
                return steer_toward(bearing, ant.heading).unwrap_or(Action::MoveForward);
            }
        }

        // Independent trials, first success wins
        if rng.gen_bool(params.drop_random) {
            return Action::DropPheromone;
        }
        if rng.gen_bool(params.turn_left) {
            return Action::TurnLeft;
        }
        if rng.gen_bool(params.turn_right) {
            return Action::TurnRight;
        }

        Action::MoveForward
    }
}

const NO_TRAIL_BEARING: f64 = -1.0;

/// Turn needed to face `target_bearing`, or `None` when already within tolerance
fn steer_toward(target_bearing: f64, heading: f64) -> Option<Action> {
    let angle_diff = wrap_angle(target_bearing - heading);

    if angle_diff > STEERING_TOLERANCE {
        Some(Action::TurnRight)
    } else if angle_diff < -STEERING_TOLERANCE {
        Some(Action::TurnLeft)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antsim_core::Vec2;
    use rand::{Error, RngCore};
    use std::collections::VecDeque;

    /// Feeds pre-scripted 64-bit draws so each Bernoulli trial is decided by the test.
    /// `0` passes any trial with p > 0, `u64::MAX` fails any trial with p < 1.
    struct ScriptedRng {
        draws: VecDeque<u64>,
    }

    const PASS: u64 = 0;
    const FAIL: u64 = u64::MAX;

    impl ScriptedRng {
        fn new(draws: &[u64]) -> Self {
            Self {
                draws: draws.iter().copied().collect(),
            }
        }

        fn remaining(&self) -> usize {
            self.draws.len()
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.draws.pop_front().expect("policy drew more values than scripted")
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest {
                *byte = self.next_u64() as u8;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FixedSenses {
        food: Option<Vec2>,
        pheromone: Option<f64>,
        home: f64,
    }

    impl Senses for FixedSenses {
        fn nearest_visible_food(&self) -> Option<Vec2> {
            self.food
        }

        fn strongest_visible_pheromone(&self) -> Option<f64> {
            self.pheromone
        }

        fn home_bearing(&self) -> f64 {
            self.home
        }
    }

    fn ant(heading: f64, carrying_food: bool) -> Ant {
        let mut ant = Ant::new(ColonyId(0), Vec2::new(100.0, 100.0), heading, 100.0);
        ant.carrying_food = carrying_food;
        ant
    }

    #[test]
    fn test_colony_assignment() {
        assert_eq!(PolicyKind::for_colony(ColonyId(0)), PolicyKind::Aggressive);
        assert_eq!(PolicyKind::for_colony(ColonyId(1)), PolicyKind::Exploratory);
        assert_eq!(PolicyKind::Aggressive.params().follow_pheromone, 0.80);
        assert_eq!(PolicyKind::Exploratory.params().turn_right, 0.40);
    }

    #[test]
    fn test_carrying_ant_turns_toward_home_without_drawing() {
        let senses = FixedSenses {
            home: 1.0,
            ..Default::default()
        };
        let mut rng = ScriptedRng::new(&[]);

        let action = PolicyKind::Aggressive.decide(&ant(0.0, true), &senses, &mut rng);
        assert_eq!(action, Action::TurnRight);

        let action = PolicyKind::Aggressive.decide(&ant(2.0, true), &senses, &mut rng);
        assert_eq!(action, Action::TurnLeft);
    }

    #[test]
    fn test_carrying_ant_facing_home() {
        let senses = FixedSenses {
            home: 0.05,
            ..Default::default()
        };

        let mut rng = ScriptedRng::new(&[PASS]);
        let action = PolicyKind::Exploratory.decide(&ant(0.0, true), &senses, &mut rng);
        assert_eq!(action, Action::DropPheromone);

        let mut rng = ScriptedRng::new(&[FAIL]);
        let action = PolicyKind::Exploratory.decide(&ant(0.0, true), &senses, &mut rng);
        assert_eq!(action, Action::MoveForward);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_home_steering_wraps_across_seam() {
        // Home just across the -PI/PI seam is a small right turn, not a full circle
        let senses = FixedSenses {
            home: -std::f64::consts::PI + 0.2,
            ..Default::default()
        };
        let mut rng = ScriptedRng::new(&[]);
        let action = PolicyKind::Aggressive.decide(&ant(3.0, true), &senses, &mut rng);
        assert_eq!(action, Action::TurnRight);
    }

    #[test]
    fn test_visible_food_overrides_randomness() {
        let senses = FixedSenses {
            food: Some(Vec2::new(10.0, 0.0)),
            ..Default::default()
        };
        let mut rng = ScriptedRng::new(&[]);

        assert_eq!(
            PolicyKind::Aggressive.decide(&ant(0.0, false), &senses, &mut rng),
            Action::MoveForward
        );
        assert_eq!(
            PolicyKind::Aggressive.decide(&ant(-0.5, false), &senses, &mut rng),
            Action::TurnRight
        );
        assert_eq!(
            PolicyKind::Aggressive.decide(&ant(0.5, false), &senses, &mut rng),
            Action::TurnLeft
        );
    }

    #[test]
    fn test_zero_food_displacement_counts_as_nothing() {
        let senses = FixedSenses {
            food: Some(Vec2::ZERO),
            ..Default::default()
        };
        // Follow trial fails, then drop succeeds
        let mut rng = ScriptedRng::new(&[FAIL, PASS]);
        let action = PolicyKind::Aggressive.decide(&ant(0.0, false), &senses, &mut rng);
        assert_eq!(action, Action::DropPheromone);
    }

    #[test]
    fn test_follows_pheromone_when_trial_passes() {
        let senses = FixedSenses {
            pheromone: Some(1.5),
            ..Default::default()
        };
        let mut rng = ScriptedRng::new(&[PASS]);
        let action = PolicyKind::Aggressive.decide(&ant(0.0, false), &senses, &mut rng);
        assert_eq!(action, Action::TurnRight);
        assert_eq!(rng.remaining(), 0);

        let mut rng = ScriptedRng::new(&[PASS]);
        let action = PolicyKind::Aggressive.decide(&ant(1.45, false), &senses, &mut rng);
        assert_eq!(action, Action::MoveForward);
    }

    #[test]
    fn test_missing_trail_falls_through_to_random_walk() {
        let senses = FixedSenses::default();
        // Follow passes but finds nothing; drop fails, left fails, right passes
        let mut rng = ScriptedRng::new(&[PASS, FAIL, FAIL, PASS]);
        let action = PolicyKind::Exploratory.decide(&ant(0.0, false), &senses, &mut rng);
        assert_eq!(action, Action::TurnRight);
        assert_eq!(rng.remaining(), 0);

        let senses = FixedSenses {
            pheromone: Some(NO_TRAIL_BEARING),
            ..Default::default()
        };
        let mut rng = ScriptedRng::new(&[PASS, FAIL, PASS]);
        let action = PolicyKind::Exploratory.decide(&ant(0.0, false), &senses, &mut rng);
        assert_eq!(action, Action::TurnLeft);
    }

    #[test]
    fn test_random_walk_stops_at_first_success() {
        let senses = FixedSenses::default();
        // Follow fails, drop fails, left passes; the right trial is never drawn
        let mut rng = ScriptedRng::new(&[FAIL, FAIL, PASS, PASS]);
        let action = PolicyKind::Aggressive.decide(&ant(0.0, false), &senses, &mut rng);
        assert_eq!(action, Action::TurnLeft);
        assert_eq!(rng.remaining(), 1);

        let mut rng = ScriptedRng::new(&[FAIL, FAIL, FAIL, FAIL]);
        let action = PolicyKind::Aggressive.decide(&ant(0.0, false), &senses, &mut rng);
        assert_eq!(action, Action::MoveForward);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_action_frequencies_follow_cascade() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let senses = FixedSenses::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let trials = 20_000;
        let mut drops = 0;
        let mut lefts = 0;
        let mut rights = 0;
        for _ in 0..trials {
            match PolicyKind::Exploratory.decide(&ant(0.0, false), &senses, &mut rng) {
                Action::DropPheromone => drops += 1,
                Action::TurnLeft => lefts += 1,
                Action::TurnRight => rights += 1,
                Action::MoveForward => {}
            }
        }

        // 0.05, then 0.95 * 0.40, then 0.95 * 0.60 * 0.40
        let expect = |p: f64| p * trials as f64;
        assert!((drops as f64 - expect(0.05)).abs() < expect(0.05) * 0.15);
        assert!((lefts as f64 - expect(0.38)).abs() < expect(0.38) * 0.05);
        assert!((rights as f64 - expect(0.228)).abs() < expect(0.228) * 0.07);
    }
}
