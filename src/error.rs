//! Validation errors raised while building holdings and portfolios.

use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Ways a holding or portfolio can fail construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Stock ticker is required")]
    EmptyTicker,

    #[error("Number of shares cannot be negative ({ticker}: {shares})")]
    NegativeShares { ticker: String, shares: f64 },

    #[error("Price cannot be negative ({ticker}: {price})")]
    NegativePrice { ticker: String, price: f64 },

    #[error("Portfolio must have at least one holding")]
    NoHoldings,

    #[error("Duplicate holding for {0}")]
    DuplicateHolding(String),

    #[error("Duplicate target allocation for {0}")]
    DuplicateTarget(String),

    /// Weight outside [0, 1], or NaN.
    #[error("Allocation weight for {ticker} must be between 0 and 1 (got {weight})")]
    WeightOutOfRange { ticker: String, weight: f64 },

    /// Holding and target key sets differ.
    #[error(
        "Holdings and target allocations must match \
         (held without target: {without_target:?}, targeted but not held: {without_holding:?})"
    )]
    MismatchedTickers {
        without_target: Vec<String>,
        without_holding: Vec<String>,
    },

    #[error("Target allocations must sum to 1.0 (current sum: {sum})")]
    WeightSum { sum: f64 },
}
