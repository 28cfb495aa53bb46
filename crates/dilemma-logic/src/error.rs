//! Simulation error types

use thiserror::Error;

/// Errors raised at construction/validation time.
///
/// Every variant is detected before the first match runs; there is no
/// partial tournament execution and no retry path.
#[derive(Debug, Error)]
pub enum SimError {
    /// Payoff tuple violates the tournament ordering constraints.
    #[error("invalid payoff matrix: {0}")]
    InvalidPayoff(String),

    /// Strategy token not recognized by the factory.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// Configuration rejected before any match ran.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
