//! Per-round action noise
//!
//! Every non-first round, each player's chosen action may independently be
//! flipped with probability epsilon before the opponent observes it.
//! Strategies that are mid-way through a pre-committed signal (PROBER's
//! probe sequence, a contrite CTFT) are immune: a flip there would corrupt
//! an intentional message, not simulate a trembling hand.

use serde::Serialize;

use crate::error::SimError;
use crate::random::SeededRng;
use crate::strategy::Action;

/// Noise process configuration.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct NoiseConfig {
    epsilon: f64,
}

impl NoiseConfig {
    /// Build a config, rejecting probabilities outside [0, 1].
    pub fn new(epsilon: f64) -> Result<Self, SimError> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(SimError::InvalidConfig(format!(
                "noise probability {epsilon} outside [0, 1]"
            )));
        }
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Resolve one player's action for this round.
    ///
    /// The uniform draw is consumed even for immune players so the RNG
    /// stream position never depends on which strategies are playing.
    pub fn resolve(&self, intended: Action, immune: bool, rng: &mut SeededRng) -> Action {
        let flip = rng.next_f64() < self.epsilon;
        if flip && !immune {
            intended.flipped()
        } else {
            intended
        }
    }
}
