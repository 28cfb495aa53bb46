//! Per-round visible state handed to strategies

use crate::strategy::Action;

/// Immutable snapshot of everything a strategy may observe for one decision.
///
/// Built fresh by the match engine each round from the previous round's
/// actual (post-noise) actions, then discarded. `own_last` and
/// `opponent_last` are only meaningful when `first_round` is false.
#[derive(Clone, Copy, Debug)]
pub struct RoundState {
    /// 1-based round number.
    pub round: u32,
    pub first_round: bool,
    /// Whether the opponent has defected at any point so far in this match.
    pub opponent_defected: bool,
    pub own_last: Action,
    pub opponent_last: Action,
    /// Running totals, for score-aware strategies.
    pub own_score: f64,
    pub opponent_score: f64,
}

impl RoundState {
    /// State for an opening round, before any history exists.
    pub fn opening() -> Self {
        Self {
            round: 1,
            first_round: true,
            opponent_defected: false,
            own_last: Action::Cooperate,
            opponent_last: Action::Cooperate,
            own_score: 0.0,
            opponent_score: 0.0,
        }
    }
}
