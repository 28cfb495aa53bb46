//! Round-robin tournament driver

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::SimError;
use crate::game::run_match;
use crate::noise::NoiseConfig;
use crate::payoff::PayoffMatrix;
use crate::random::SeededRng;
use crate::stats::{self, ScoreSummary};
use crate::strategy::Strategy;

/// Everything a tournament run needs. Validated as a whole before the first
/// match; a failed validation aborts the run with nothing executed.
#[derive(Clone, Debug)]
pub struct TournamentConfig {
    /// Strategy name tokens, e.g. `["TFT", "ALLD", "RND0.3"]`.
    pub strategies: Vec<String>,
    /// Rounds per match.
    pub rounds: u32,
    /// Repetitions per pairing.
    pub repeats: u32,
    pub payoff: PayoffMatrix,
    /// Seed for the single RNG shared across the whole run.
    pub seed: u64,
    /// Action-flip probability; `None` disables noise entirely.
    pub epsilon: Option<f64>,
}

impl TournamentConfig {
    /// Check every assumption the engine makes; called by
    /// [`run_tournament`] before any match runs.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.rounds == 0 {
            return Err(SimError::InvalidConfig(
                "rounds must be a positive integer".to_string(),
            ));
        }
        if self.repeats == 0 {
            return Err(SimError::InvalidConfig(
                "repeats must be a positive integer".to_string(),
            ));
        }
        if self.strategies.len() < 2 {
            return Err(SimError::InvalidConfig(
                "at least two strategy names required".to_string(),
            ));
        }

        let mut names = Vec::with_capacity(self.strategies.len());
        for token in &self.strategies {
            names.push(Strategy::from_name(token)?.name());
        }
        names.sort();
        if names.windows(2).any(|w| w[0] == w[1]) {
            return Err(SimError::InvalidConfig(
                "duplicate strategy names in the round-robin list".to_string(),
            ));
        }

        if let Some(epsilon) = self.epsilon {
            NoiseConfig::new(epsilon)?;
        }
        Ok(())
    }
}

/// Directed pairing statistics: summaries for `first` and `second` under
/// the (first, second) ordering.
#[derive(Clone, Debug, Serialize)]
pub struct PairStatistics {
    pub first: String,
    pub second: String,
    pub first_summary: ScoreSummary,
    pub second_summary: ScoreSummary,
}

impl PairStatistics {
    /// The same pairing viewed from the other side.
    fn mirrored(&self) -> Self {
        Self {
            first: self.second.clone(),
            second: self.first.clone(),
            first_summary: self.second_summary,
            second_summary: self.first_summary,
        }
    }
}

/// One leaderboard row, pooled over every repetition the strategy played.
#[derive(Clone, Debug, Serialize)]
pub struct LeaderboardRow {
    pub name: String,
    pub mean: f64,
    pub stdev: f64,
}

/// Aggregated tournament output: the pairwise results plus the views the
/// output layer renders.
#[derive(Clone, Debug, Serialize)]
pub struct TournamentResult {
    /// Strategy display names in configuration order.
    pub strategies: Vec<String>,
    /// One entry per unordered pairing, in schedule order.
    pub pairings: Vec<PairStatistics>,
    /// Ranked descending by mean score.
    pub leaderboard: Vec<LeaderboardRow>,
    /// Directed lookup table including mirrored entries.
    #[serde(skip)]
    table: BTreeMap<(String, String), PairStatistics>,
}

impl TournamentResult {
    /// Statistics for the directed pair, if the two strategies met.
    pub fn pair(&self, first: &str, second: &str) -> Option<&PairStatistics> {
        self.table.get(&(first.to_string(), second.to_string()))
    }

    /// Square matrix of mean scores: entry (i, j) holds strategy i's mean
    /// against strategy j; self cells are `None`.
    pub fn mean_matrix(&self) -> Vec<Vec<Option<f64>>> {
        self.strategies
            .iter()
            .map(|row| {
                self.strategies
                    .iter()
                    .map(|col| self.pair(row, col).map(|p| p.first_summary.mean))
                    .collect()
            })
            .collect()
    }
}

/// Run the full round-robin schedule described by `config`.
///
/// Every unordered pair of distinct strategies plays `repeats` repetitions
/// with freshly-built instances; one shared RNG is threaded through the
/// whole schedule, so a fixed seed reproduces the run exactly.
pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentResult, SimError> {
    config.validate()?;

    let noise = config.epsilon.map(NoiseConfig::new).transpose()?;
    let mut rng = SeededRng::new(config.seed);

    let display: Vec<String> = config
        .strategies
        .iter()
        .map(|token| Strategy::from_name(token).map(|s| s.name()))
        .collect::<Result<_, _>>()?;

    let mut pairings = Vec::new();
    let mut table = BTreeMap::new();
    let mut samples: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for i in 0..config.strategies.len() {
        for j in (i + 1)..config.strategies.len() {
            let mut first_scores = Vec::with_capacity(config.repeats as usize);
            let mut second_scores = Vec::with_capacity(config.repeats as usize);

            for _ in 0..config.repeats {
                let mut a = Strategy::from_name(&config.strategies[i])?;
                let mut b = Strategy::from_name(&config.strategies[j])?;
                let result = run_match(
                    &mut a,
                    &mut b,
                    &config.payoff,
                    config.rounds,
                    noise.as_ref(),
                    &mut rng,
                );
                first_scores.push(result.total_score_a);
                second_scores.push(result.total_score_b);
            }

            log::debug!(
                "{} vs {}: {} repetitions complete",
                display[i],
                display[j],
                config.repeats
            );

            let pair = PairStatistics {
                first: display[i].clone(),
                second: display[j].clone(),
                first_summary: ScoreSummary::from_sample(&first_scores),
                second_summary: ScoreSummary::from_sample(&second_scores),
            };
            table.insert((display[i].clone(), display[j].clone()), pair.clone());
            table.insert((display[j].clone(), display[i].clone()), pair.mirrored());
            pairings.push(pair);

            samples
                .entry(display[i].clone())
                .or_default()
                .extend(&first_scores);
            samples
                .entry(display[j].clone())
                .or_default()
                .extend(&second_scores);
        }
    }

    let mut leaderboard: Vec<LeaderboardRow> = display
        .iter()
        .map(|name| {
            let sample = &samples[name.as_str()];
            let mean = stats::mean(sample);
            LeaderboardRow {
                name: name.clone(),
                mean,
                stdev: stats::sample_stdev(sample, mean),
            }
        })
        .collect();
    leaderboard.sort_by(|a, b| b.mean.total_cmp(&a.mean).then_with(|| a.name.cmp(&b.name)));

    Ok(TournamentResult {
        strategies: display,
        pairings,
        leaderboard,
        table,
    })
}
