//! Forecast accuracy metrics

use crate::{MathError, Result};

/// Absolute percentage deviation of `predicted` from `observed`.
///
/// Fails when `observed` is zero or not finite. An overflowed `predicted`
/// yields an infinite error rather than a failure.
pub fn relative_error_pct(predicted: f64, observed: f64) -> Result<f64> {
    if !observed.is_finite() {
        return Err(MathError::InvalidInput(
            "Relative error requires a finite observation".to_string(),
        ));
    }
    if observed == 0.0 {
        return Err(MathError::CalculationError(
            "Cannot compute relative error against a zero observation".to_string(),
        ));
    }

    Ok(((predicted - observed) / observed).abs() * 100.0)
}

/// Complement of a relative error percentage.
pub fn confidence_score(relative_error_pct: f64) -> f64 {
    100.0 - relative_error_pct
}
