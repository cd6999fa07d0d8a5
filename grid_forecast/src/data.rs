//! Input format detection and parsing into raw records

use crate::error::{ForecastError, Result};
use grid_math::display_number;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// An untyped field value exactly as the parser produced it
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Text cell or JSON string
    Text(String),
    /// JSON number
    Number(f64),
    /// Any other JSON value (null, bool, array, object)
    Other(Value),
}

impl RawValue {
    /// Convert a JSON value, keeping numbers and strings distinct
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => RawValue::Text(text),
            Value::Number(number) => match number.as_f64() {
                Some(n) => RawValue::Number(n),
                None => RawValue::Other(Value::Number(number)),
            },
            other => RawValue::Other(other),
        }
    }

    /// Whether the value counts as absent.
    ///
    /// Empty text, zero, `null`, `false` and empty containers are all empty.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Text(text) => text.is_empty(),
            RawValue::Number(n) => *n == 0.0,
            RawValue::Other(Value::Null) => true,
            RawValue::Other(Value::Bool(flag)) => !flag,
            RawValue::Other(Value::Array(items)) => items.is_empty(),
            RawValue::Other(Value::Object(map)) => map.is_empty(),
            RawValue::Other(_) => false,
        }
    }

    /// Borrow the text of a `Text` value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(text) => f.write_str(text),
            RawValue::Number(n) => f.write_str(&display_number(*n)),
            RawValue::Other(value) => write!(f, "{}", value),
        }
    }
}

/// One parsed row: field name to untyped value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, RawValue>,
}

impl RawRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: RawValue) {
        self.fields.insert(name.into(), value);
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    /// Look up a field, treating empty values as absent
    pub fn present(&self, name: &str) -> Option<&RawValue> {
        self.get(name).filter(|value| !value.is_empty())
    }

    /// Number of fields held
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record holds no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Recognised input shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON object carrying a `records` array
    Json,
    /// Comma separated text with a header line
    Delimited,
}

/// Minimum number of comma separated tokens for single-line delimited input.
const MIN_DELIMITED_TOKENS: usize = 6;

impl InputFormat {
    /// Decide which parser applies to `input`
    pub fn detect(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.starts_with('{') {
            Ok(InputFormat::Json)
        } else if trimmed.contains(',')
            && (trimmed.contains('\n') || trimmed.split(',').count() >= MIN_DELIMITED_TOKENS)
        {
            Ok(InputFormat::Delimited)
        } else {
            Err(ForecastError::format(
                "Invalid data format. Please provide data in CSV or JSON format.",
            ))
        }
    }
}

/// Data loader for energy usage payloads
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Read a payload from a file
    pub fn read_input<P: AsRef<Path>>(path: P) -> Result<String> {
        let text = fs::read_to_string(path)?;
        Ok(text)
    }

    /// Detect the format of `input` and parse it into raw records
    pub fn parse(input: &str) -> Result<Vec<RawRecord>> {
        let format = InputFormat::detect(input)?;
        debug!(?format, "detected input format");

        let trimmed = input.trim();
        let records = match format {
            InputFormat::Json => Self::parse_json(trimmed),
            InputFormat::Delimited => Self::parse_delimited(trimmed),
        };

        if let Err(err) = &records {
            warn!(error = %err, "failed to parse input");
        }
        records
    }

    /// Parse a JSON object with a top-level `records` array
    pub fn parse_json(input: &str) -> Result<Vec<RawRecord>> {
        let document: Value = serde_json::from_str(input)
            .map_err(|e| ForecastError::format(format!("Invalid JSON format. {}", e)))?;

        let rows = match document {
            Value::Object(mut map) => match map.remove("records") {
                Some(Value::Array(rows)) => rows,
                _ => return Err(Self::missing_records_array()),
            },
            _ => return Err(Self::missing_records_array()),
        };

        Ok(rows.into_iter().map(Self::record_from_json).collect())
    }

    /// Parse comma separated text whose first line names the fields
    pub fn parse_delimited(input: &str) -> Result<Vec<RawRecord>> {
        let invalid = |e: csv::Error| ForecastError::format(format!("Invalid CSV format. {}", e));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input.as_bytes());

        let headers = reader.headers().map_err(invalid)?.clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(invalid)?;
            if row.len() == 1 && row.get(0).map_or(true, str::is_empty) {
                continue;
            }

            let record: RawRecord = headers
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| (name, RawValue::Text(cell.to_string())))
                .collect();
            records.push(record);
        }

        Ok(records)
    }

    fn record_from_json(row: Value) -> RawRecord {
        match row {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| (name, RawValue::from_json(value)))
                .collect(),
            _ => RawRecord::new(),
        }
    }

    fn missing_records_array() -> ForecastError {
        ForecastError::format("Invalid JSON format. Expected 'records' array.")
    }
}
