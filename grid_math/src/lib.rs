//! # Grid Math
//!
//! Numeric helpers shared by the smart grid forecasting crates.
//! This crate knows nothing about records or reports; it provides the
//! rounding, number display and error metric calculations they rely on.

use thiserror::Error;

pub mod accuracy;
pub mod rounding;

pub use accuracy::{confidence_score, relative_error_pct};
pub use rounding::{display_number, round_to};

/// Errors that can occur in grid math calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for grid math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = MathError::InvalidInput("observed value must be non-zero".to_string());
        assert_eq!(err.to_string(), "Invalid input: observed value must be non-zero");
    }
}
