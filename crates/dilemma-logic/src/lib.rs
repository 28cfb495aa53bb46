//! Core logic for iterated prisoner's dilemma tournaments
//!
//! The strategy set (ten decision variants with private per-match memory),
//! the match round loop with optional action noise, and the round-robin
//! tournament driver with summary statistics. All randomness flows from a
//! single explicitly-seeded generator, so a fixed seed reproduces an
//! entire run bit-for-bit.

mod error;
mod game;
mod noise;
mod payoff;
mod random;
mod state;
mod stats;
mod strategy;
mod tournament;

pub use error::SimError;
pub use game::{run_match, MatchResult, RoundOutcome};
pub use noise::NoiseConfig;
pub use payoff::PayoffMatrix;
pub use random::SeededRng;
pub use state::RoundState;
pub use stats::ScoreSummary;
pub use strategy::{Action, Strategy};
pub use tournament::{
    run_tournament, LeaderboardRow, PairStatistics, TournamentConfig, TournamentResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_scenario() {
        // The canonical smoke run: TFT vs ALLD, 5 rounds, default payoffs.
        let config = TournamentConfig {
            strategies: vec!["TFT".to_string(), "ALLD".to_string()],
            rounds: 5,
            repeats: 1,
            payoff: PayoffMatrix::default(),
            seed: 0,
            epsilon: None,
        };
        let result = run_tournament(&config).unwrap();
        let pair = result.pair("TFT", "ALLD").unwrap();
        assert_eq!(pair.first_summary.mean, 4.0);
        assert_eq!(pair.second_summary.mean, 9.0);
    }
}
