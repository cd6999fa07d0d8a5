//! Linear energy consumption forecast and reliability classification

use crate::error::Result;
use crate::validation::ValidatedRecord;
use grid_math::{confidence_score, relative_error_pct, round_to};
use serde::Serialize;
use std::fmt;

/// Decimal places used for every reported figure
pub const DISPLAY_PLACES: usize = 2;

/// Highest relative error (%) for a highly reliable forecast
const HIGH_ERROR_LIMIT: f64 = 10.0;
/// Lowest confidence for a highly reliable forecast
const HIGH_CONFIDENCE_FLOOR: f64 = 90.0;
/// Highest relative error (%) for a moderately reliable forecast
const MODERATE_ERROR_LIMIT: f64 = 20.0;
/// Lowest confidence for a moderately reliable forecast
const MODERATE_CONFIDENCE_FLOOR: f64 = 80.0;

/// Reliability class of a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reliability {
    #[serde(rename = "Highly Reliable")]
    HighlyReliable,
    #[serde(rename = "Moderately Reliable")]
    ModeratelyReliable,
    #[serde(rename = "Low Reliability")]
    LowReliability,
}

impl Reliability {
    /// Classify from unrounded error and confidence; first matching rule wins
    pub fn classify(relative_error: f64, confidence: f64) -> Self {
        if relative_error <= HIGH_ERROR_LIMIT && confidence >= HIGH_CONFIDENCE_FLOOR {
            Reliability::HighlyReliable
        } else if (relative_error > HIGH_ERROR_LIMIT && relative_error <= MODERATE_ERROR_LIMIT)
            || (confidence >= MODERATE_CONFIDENCE_FLOOR && confidence < HIGH_CONFIDENCE_FLOOR)
        {
            Reliability::ModeratelyReliable
        } else {
            Reliability::LowReliability
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Reliability::HighlyReliable => "Highly Reliable",
            Reliability::ModeratelyReliable => "Moderately Reliable",
            Reliability::LowReliability => "Low Reliability",
        }
    }

    /// Recommended action for this class
    pub fn recommendation(self) -> &'static str {
        match self {
            Reliability::HighlyReliable => "Forecast is highly reliable.",
            Reliability::ModeratelyReliable => "Forecast is moderately reliable.",
            Reliability::LowReliability => {
                "Forecast reliability is low. Further analysis is required."
            }
        }
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrounded intermediate values of the linear model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastCalculation {
    pub adjusted_consumption: f64,
    pub time_adjustment: f64,
    pub predicted_energy: f64,
    pub relative_error: f64,
    pub confidence_score: f64,
}

impl ForecastCalculation {
    /// Apply the linear model to one record
    pub fn compute(record: &ValidatedRecord) -> Result<Self> {
        let adjusted_consumption = record.historical_energy_consumption * record.parameter_a;
        let time_adjustment = record.parameter_b * record.forecast_time as f64;
        let predicted_energy = record.baseline + adjusted_consumption + time_adjustment;
        let relative_error =
            relative_error_pct(predicted_energy, record.historical_energy_consumption)?;

        Ok(Self {
            adjusted_consumption,
            time_adjustment,
            predicted_energy,
            relative_error,
            confidence_score: confidence_score(relative_error),
        })
    }
}

/// Forecast for one validated record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult<'a> {
    record: &'a ValidatedRecord,
    adjusted_consumption: f64,
    time_adjustment: f64,
    predicted_energy: f64,
    relative_error: f64,
    confidence_score: f64,
    status: Reliability,
    recommendation: &'static str,
    #[serde(skip)]
    unrounded: ForecastCalculation,
}

impl<'a> ForecastResult<'a> {
    /// Forecast a single record
    pub fn compute(record: &'a ValidatedRecord) -> Result<Self> {
        let calc = ForecastCalculation::compute(record)?;
        let status = Reliability::classify(calc.relative_error, calc.confidence_score);

        Ok(Self {
            record,
            adjusted_consumption: round_to(calc.adjusted_consumption, DISPLAY_PLACES),
            time_adjustment: round_to(calc.time_adjustment, DISPLAY_PLACES),
            predicted_energy: round_to(calc.predicted_energy, DISPLAY_PLACES),
            relative_error: round_to(calc.relative_error, DISPLAY_PLACES),
            confidence_score: round_to(calc.confidence_score, DISPLAY_PLACES),
            status,
            recommendation: status.recommendation(),
            unrounded: calc,
        })
    }

    /// Source record
    pub fn record(&self) -> &'a ValidatedRecord {
        self.record
    }

    pub fn adjusted_consumption(&self) -> f64 {
        self.adjusted_consumption
    }

    pub fn time_adjustment(&self) -> f64 {
        self.time_adjustment
    }

    pub fn predicted_energy(&self) -> f64 {
        self.predicted_energy
    }

    /// Relative error in percent, rounded for display
    pub fn relative_error(&self) -> f64 {
        self.relative_error
    }

    pub fn confidence_score(&self) -> f64 {
        self.confidence_score
    }

    pub fn status(&self) -> Reliability {
        self.status
    }

    pub fn recommendation(&self) -> &'static str {
        self.recommendation
    }

    /// Values before display rounding
    pub fn unrounded(&self) -> &ForecastCalculation {
        &self.unrounded
    }
}

/// Forecast every record, preserving input order
pub fn forecast_batch(records: &[ValidatedRecord]) -> Result<Vec<ForecastResult<'_>>> {
    records.iter().map(ForecastResult::compute).collect()
}
