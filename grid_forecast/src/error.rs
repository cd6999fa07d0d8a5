//! Error types for the grid_forecast crate
//!
//! The `Display` text of the record-level variants is the exact line that
//! ends up in the validation report, so the error log is simply the
//! rendered errors in detection order.

use crate::validation::Field;
use grid_math::MathError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Custom error types for the grid_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Input is neither JSON nor delimited text, or is malformed within its format
    #[error("ERROR: {0}")]
    Format(String),

    /// One or more required fields are absent or empty in a row
    #[error("ERROR: Missing required field(s): {} in row {row}.", join_fields(.fields))]
    MissingField { row: usize, fields: Vec<Field> },

    /// A present field failed its type or range rule
    #[error("ERROR: {}", describe_field_problem(.row, .field, .problem))]
    FieldType {
        row: usize,
        field: Field,
        problem: FieldProblem,
    },

    /// Error from forecast arithmetic
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Why a present field value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    /// Not an ISO-8601 date-time
    NotIsoTimestamp,
    /// Not a finite number
    NotNumeric,
    /// Numeric but zero or negative
    NotPositive,
    /// Not a finite number where an integer was expected
    NotInteger,
    /// Numeric but fractional, zero or negative
    NotPositiveInteger,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expectation = match self {
            FieldProblem::NotIsoTimestamp => "Expected ISO format.",
            FieldProblem::NotNumeric => "Expected numeric value.",
            FieldProblem::NotPositive => "Expected positive number.",
            FieldProblem::NotInteger => "Expected integer value.",
            FieldProblem::NotPositiveInteger => "Expected positive integer.",
        };
        f.write_str(expectation)
    }
}

impl ForecastError {
    /// Build a format error from any displayable detail
    pub fn format(detail: impl fmt::Display) -> Self {
        ForecastError::Format(detail.to_string())
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_field_problem(row: &usize, field: &Field, problem: &FieldProblem) -> String {
    match problem {
        FieldProblem::NotIsoTimestamp => {
            format!("Invalid timestamp format in row {}. {}", row, problem)
        }
        _ => format!(
            "Invalid value for field '{}' in row {}. {}",
            field, row, problem
        ),
    }
}
