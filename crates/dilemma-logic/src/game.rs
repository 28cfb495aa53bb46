//! Match execution engine

use serde::Serialize;

use crate::noise::NoiseConfig;
use crate::payoff::PayoffMatrix;
use crate::random::SeededRng;
use crate::state::RoundState;
use crate::strategy::{Action, Strategy};

/// Result of a single round
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RoundOutcome {
    pub round: u32,
    /// Post-noise actions, as observed by the opponent.
    pub action_a: Action,
    pub action_b: Action,
    pub score_a: f64,
    pub score_b: f64,
    pub cumulative_a: f64,
    pub cumulative_b: f64,
}

/// Result of a complete match
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub rounds: Vec<RoundOutcome>,
    pub total_score_a: f64,
    pub total_score_b: f64,
}

/// Run a complete match between two strategy instances.
///
/// Resets both score accumulators, then plays `rounds` rounds: build each
/// side's [`RoundState`] from the previous round's actual actions, decide,
/// resolve noise (never on the opening round), report intended vs actual
/// back to the strategies, and score the actual action pair.
///
/// Fully deterministic given the RNG stream and inputs.
pub fn run_match(
    strategy_a: &mut Strategy,
    strategy_b: &mut Strategy,
    payoff: &PayoffMatrix,
    rounds: u32,
    noise: Option<&NoiseConfig>,
    rng: &mut SeededRng,
) -> MatchResult {
    strategy_a.reset_score();
    strategy_b.reset_score();

    let mut a_last = Action::Cooperate;
    let mut b_last = Action::Cooperate;
    let mut a_opponent_defected = false;
    let mut b_opponent_defected = false;
    let mut outcomes = Vec::with_capacity(rounds as usize);

    for round in 1..=rounds {
        let state_a = RoundState {
            round,
            first_round: round == 1,
            opponent_defected: a_opponent_defected,
            own_last: a_last,
            opponent_last: b_last,
            own_score: strategy_a.score(),
            opponent_score: strategy_b.score(),
        };
        let state_b = RoundState {
            round,
            first_round: round == 1,
            opponent_defected: b_opponent_defected,
            own_last: b_last,
            opponent_last: a_last,
            own_score: strategy_b.score(),
            opponent_score: strategy_a.score(),
        };

        // Decisions are independent given state; A draws first by convention.
        let intended_a = strategy_a.decide(&state_a, rng);
        let intended_b = strategy_b.decide(&state_b, rng);

        // Noise never touches the opening round.
        let (actual_a, actual_b) = match noise {
            Some(cfg) if round > 1 => (
                cfg.resolve(intended_a, strategy_a.noise_immune(), rng),
                cfg.resolve(intended_b, strategy_b.noise_immune(), rng),
            ),
            _ => (intended_a, intended_b),
        };

        strategy_a.observe_outcome(intended_a, actual_a);
        strategy_b.observe_outcome(intended_b, actual_b);

        // Defection history tracks what was observed, noise included.
        if actual_b == Action::Defect {
            a_opponent_defected = true;
        }
        if actual_a == Action::Defect {
            b_opponent_defected = true;
        }

        let score_a = payoff.score(actual_a.is_cooperate(), actual_b.is_cooperate());
        let score_b = payoff.score(actual_b.is_cooperate(), actual_a.is_cooperate());
        strategy_a.add_score(score_a);
        strategy_b.add_score(score_b);

        log::trace!(
            "round {}: {:?}/{:?} -> {}-{}",
            round,
            actual_a,
            actual_b,
            strategy_a.score(),
            strategy_b.score()
        );

        outcomes.push(RoundOutcome {
            round,
            action_a: actual_a,
            action_b: actual_b,
            score_a,
            score_b,
            cumulative_a: strategy_a.score(),
            cumulative_b: strategy_b.score(),
        });

        a_last = actual_a;
        b_last = actual_b;
    }

    MatchResult {
        rounds: outcomes,
        total_score_a: strategy_a.score(),
        total_score_b: strategy_b.score(),
    }
}
