//! Field-by-field record validation
//!
//! Every required field is checked independently and every violation is
//! logged, so a single row can contribute a missing-field error and several
//! field errors at once. Only rows with no violation at all are coerced into
//! a [`ValidatedRecord`].

use crate::data::{RawRecord, RawValue};
use crate::error::{FieldProblem, ForecastError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, warn};

/// The six required fields, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Timestamp,
    HistoricalEnergyConsumption,
    ParameterA,
    ParameterB,
    ForecastTime,
    Baseline,
}

impl Field {
    /// All required fields in their fixed order
    pub const ALL: [Field; 6] = [
        Field::Timestamp,
        Field::HistoricalEnergyConsumption,
        Field::ParameterA,
        Field::ParameterB,
        Field::ForecastTime,
        Field::Baseline,
    ];

    /// Field name as it appears in input payloads
    pub fn name(self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::HistoricalEnergyConsumption => "historical_energy_consumption",
            Field::ParameterA => "parameter_a",
            Field::ParameterB => "parameter_b",
            Field::ForecastTime => "forecast_time",
            Field::Baseline => "baseline",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Status reported before any row passes this field
    fn initial_status(self) -> FieldStatus {
        match self {
            Field::Timestamp => FieldStatus::Missing,
            _ => FieldStatus::Invalid,
        }
    }

    /// Status reported once some row passes this field
    fn passing_status(self) -> FieldStatus {
        match self {
            Field::Timestamp => FieldStatus::Present,
            _ => FieldStatus::Valid,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregate status of one field across a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Missing,
    Invalid,
    Present,
    Valid,
}

impl FieldStatus {
    /// Whether this status records at least one passing row
    pub fn is_passing(self) -> bool {
        matches!(self, FieldStatus::Present | FieldStatus::Valid)
    }

    /// Monotonic merge: a passing status is never replaced by a failing one
    pub fn merge(self, other: FieldStatus) -> FieldStatus {
        if self.is_passing() && !other.is_passing() {
            self
        } else {
            other
        }
    }

    fn label(self) -> &'static str {
        match self {
            FieldStatus::Missing => "missing",
            FieldStatus::Invalid => "invalid",
            FieldStatus::Present => "present",
            FieldStatus::Valid => "valid",
        }
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-size table of per-field aggregate statuses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStatusTable {
    statuses: [FieldStatus; 6],
}

impl Default for FieldStatusTable {
    fn default() -> Self {
        Self {
            statuses: Field::ALL.map(Field::initial_status),
        }
    }
}

impl FieldStatusTable {
    /// Status of a single field
    pub fn get(&self, field: Field) -> FieldStatus {
        self.statuses[field.index()]
    }

    /// Note that some row passed `field`
    pub fn record_pass(&mut self, field: Field) {
        let slot = &mut self.statuses[field.index()];
        *slot = slot.merge(field.passing_status());
    }

    /// Fields with their statuses in report order
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldStatus)> + '_ {
        Field::ALL.iter().map(move |&field| (field, self.get(field)))
    }
}

impl Serialize for FieldStatusTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::ALL.len()))?;
        for (field, status) in self.iter() {
            map.serialize_entry(field.name(), &status)?;
        }
        map.end()
    }
}

/// A record whose every field passed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedRecord {
    /// Timestamp exactly as supplied
    pub timestamp: String,
    /// Parsed timestamp; naive inputs are read as UTC
    pub observed_at: DateTime<FixedOffset>,
    pub historical_energy_consumption: f64,
    pub parameter_a: f64,
    pub parameter_b: f64,
    pub forecast_time: u64,
    pub baseline: f64,
}

/// Batch-wide validation accumulator
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationOutcome {
    total_records: usize,
    fields_status: FieldStatusTable,
    errors: Vec<String>,
}

impl ValidationOutcome {
    /// Start an empty outcome
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows the parser produced
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Record how many rows the parser produced
    pub fn set_total_records(&mut self, total: usize) {
        self.total_records = total;
    }

    /// Aggregate field statuses
    pub fn fields_status(&self) -> &FieldStatusTable {
        &self.fields_status
    }

    /// Logged error messages in detection order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True when nothing at all was logged
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append an error to the log
    pub fn push_error(&mut self, error: ForecastError) {
        warn!(%error, "validation issue");
        self.errors.push(error.to_string());
    }

    /// Validate one row (1-based `row`) and coerce it when every check passed
    pub fn validate_record(&mut self, record: &RawRecord, row: usize) -> Option<ValidatedRecord> {
        let missing: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|field| record.present(field.name()).is_none())
            .collect();
        let complete = missing.is_empty();
        if !complete {
            self.push_error(ForecastError::MissingField {
                row,
                fields: missing,
            });
        }

        let timestamp = self.check(record, row, Field::Timestamp, |value| {
            parse_timestamp(value).map(|at| (value.to_string(), at))
        });
        let historical = self.check(
            record,
            row,
            Field::HistoricalEnergyConsumption,
            parse_positive_number,
        );
        let parameter_a = self.check(record, row, Field::ParameterA, parse_positive_number);
        let parameter_b = self.check(record, row, Field::ParameterB, parse_positive_number);
        let forecast_time = self.check(record, row, Field::ForecastTime, parse_positive_integer);
        let baseline = self.check(record, row, Field::Baseline, parse_positive_number);

        if !complete {
            debug!(row, "row rejected for missing fields");
            return None;
        }

        let (timestamp, observed_at) = timestamp?;
        let validated = ValidatedRecord {
            timestamp,
            observed_at,
            historical_energy_consumption: historical?,
            parameter_a: parameter_a?,
            parameter_b: parameter_b?,
            forecast_time: forecast_time?,
            baseline: baseline?,
        };
        debug!(row, timestamp = %validated.timestamp, "row validated");
        Some(validated)
    }

    fn check<T>(
        &mut self,
        record: &RawRecord,
        row: usize,
        field: Field,
        parse: impl FnOnce(&RawValue) -> Result<T, FieldProblem>,
    ) -> Option<T> {
        let value = record.present(field.name())?;
        match parse(value) {
            Ok(parsed) => {
                self.fields_status.record_pass(field);
                Some(parsed)
            }
            Err(problem) => {
                self.push_error(ForecastError::FieldType {
                    row,
                    field,
                    problem,
                });
                None
            }
        }
    }
}

const OFFSET_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 date-time, accepting a literal `Z` as UTC
pub fn parse_timestamp(value: &RawValue) -> Result<DateTime<FixedOffset>, FieldProblem> {
    let text = value.as_text().ok_or(FieldProblem::NotIsoTimestamp)?;
    let normalized = text.replace('Z', "+00:00");

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(parsed);
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&normalized, format) {
            return Ok(parsed);
        }
    }

    let utc = Utc.fix();
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| utc.from_utc_datetime(&naive))
        .ok_or(FieldProblem::NotIsoTimestamp)
}

fn numeric(value: &RawValue) -> Option<f64> {
    let number = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(text) => text.trim().parse::<f64>().ok()?,
        RawValue::Other(_) => return None,
    };
    number.is_finite().then_some(number)
}

/// Parse a finite, strictly positive number
pub fn parse_positive_number(value: &RawValue) -> Result<f64, FieldProblem> {
    let number = numeric(value).ok_or(FieldProblem::NotNumeric)?;
    if number <= 0.0 {
        return Err(FieldProblem::NotPositive);
    }
    Ok(number)
}

/// Smallest float that no longer fits in a `u64` (2^64).
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Parse a strictly positive number with no fractional part that fits in a `u64`
pub fn parse_positive_integer(value: &RawValue) -> Result<u64, FieldProblem> {
    let number = numeric(value).ok_or(FieldProblem::NotInteger)?;
    let whole = number.trunc();
    if whole <= 0.0 || whole != number || whole >= U64_LIMIT {
        return Err(FieldProblem::NotPositiveInteger);
    }
    Ok(whole as u64)
}
