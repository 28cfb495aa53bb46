//! Payoff matrix for the Prisoner's Dilemma

use serde::Serialize;

use crate::error::SimError;

/// The four canonical payoff values: temptation, reward, punishment, sucker.
///
/// Construction enforces T > R > P > S and 2R > T + S, the standard
/// tournament conditions. Immutable afterwards; owned by the tournament and
/// shared read-only with every match.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PayoffMatrix {
    t: f64,
    r: f64,
    p: f64,
    s: f64,
}

impl PayoffMatrix {
    /// Build a matrix, rejecting tuples that violate the IPD ordering.
    pub fn new(t: f64, r: f64, p: f64, s: f64) -> Result<Self, SimError> {
        if !(t > r && r > p && p > s) {
            return Err(SimError::InvalidPayoff(format!(
                "T > R > P > S must hold, got ({t}, {r}, {p}, {s})"
            )));
        }
        if 2.0 * r <= t + s {
            return Err(SimError::InvalidPayoff(format!(
                "2R > T + S must hold, got ({t}, {r}, {p}, {s})"
            )));
        }
        Ok(Self { t, r, p, s })
    }

    /// Payoff for one player given both cooperation flags.
    pub fn score(&self, cooperated: bool, opponent_cooperated: bool) -> f64 {
        match (cooperated, opponent_cooperated) {
            (true, true) => self.r,
            (true, false) => self.s,
            (false, true) => self.t,
            (false, false) => self.p,
        }
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn s(&self) -> f64 {
        self.s
    }
}

impl Default for PayoffMatrix {
    /// Axelrod's classic (5, 3, 1, 0) tuple.
    fn default() -> Self {
        Self {
            t: 5.0,
            r: 3.0,
            p: 1.0,
            s: 0.0,
        }
    }
}
