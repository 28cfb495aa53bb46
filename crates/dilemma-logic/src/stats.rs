//! Summary statistics over repetition score samples

use serde::Serialize;

/// Mean, spread and 95% confidence bounds of one player's score sample.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ScoreSummary {
    pub mean: f64,
    /// Bessel-corrected sample standard deviation; 0 for a single sample.
    pub stdev: f64,
    /// `(low, high)` 95% bounds, `None` when only one repetition was run.
    pub ci95: Option<(f64, f64)>,
}

impl ScoreSummary {
    /// Summarize a sample of per-repetition match totals.
    pub fn from_sample(scores: &[f64]) -> Self {
        let mean = mean(scores);
        let stdev = sample_stdev(scores, mean);
        let ci95 = if scores.len() > 1 {
            let half = 1.96 * stdev / (scores.len() as f64).sqrt();
            Some((mean - half, mean + half))
        } else {
            None
        };
        Self { mean, stdev, ci95 }
    }
}

pub fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Bessel-corrected sample standard deviation; 0 for samples of size <= 1.
pub fn sample_stdev(scores: &[f64], mean: f64) -> f64 {
    if scores.len() <= 1 {
        return 0.0;
    }
    let sum_squared: f64 = scores.iter().map(|s| (s - mean) * (s - mean)).sum();
    (sum_squared / (scores.len() - 1) as f64).sqrt()
}
