//! End-to-end processing: parse, validate, forecast, render

use crate::data::DataLoader;
use crate::error::Result;
use crate::forecast::{forecast_batch, ForecastResult};
use crate::report::render_document;
use crate::validation::{ValidatedRecord, ValidationOutcome};
use serde::Serialize;
use tracing::info;

/// Result of the ingestion and validation stage
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidatedBatch {
    /// Batch-wide statuses and error log
    pub outcome: ValidationOutcome,
    /// Rows that passed every check, in input order
    pub records: Vec<ValidatedRecord>,
}

impl ValidatedBatch {
    /// Forecast every validated record
    pub fn forecasts(&self) -> Result<Vec<ForecastResult<'_>>> {
        let results = forecast_batch(&self.records)?;
        info!(forecasts = results.len(), "forecasts computed");
        Ok(results)
    }
}

/// Machine-readable view of a processed batch
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport<'a> {
    pub validation: &'a ValidationOutcome,
    pub forecasts: Vec<ForecastResult<'a>>,
}

impl<'a> PipelineReport<'a> {
    pub fn from_batch(batch: &'a ValidatedBatch) -> Result<Self> {
        Ok(Self {
            validation: &batch.outcome,
            forecasts: batch.forecasts()?,
        })
    }

    /// Markdown document for this batch
    pub fn to_markdown(&self) -> String {
        render_document(self.validation, &self.forecasts)
    }
}

/// Parse and validate a payload.
///
/// Parse failures land in the error log and leave the batch empty.
pub fn validate_input(input: &str) -> ValidatedBatch {
    let mut outcome = ValidationOutcome::new();
    let rows = DataLoader::parse(input).unwrap_or_else(|err| {
        outcome.push_error(err);
        Vec::new()
    });
    outcome.set_total_records(rows.len());

    let records: Vec<ValidatedRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| outcome.validate_record(row, index + 1))
        .collect();

    info!(
        total = outcome.total_records(),
        valid = records.len(),
        errors = outcome.errors().len(),
        "validation finished"
    );
    ValidatedBatch { outcome, records }
}

/// Run the whole pipeline and render the markdown document
pub fn process(input: &str) -> Result<String> {
    let batch = validate_input(input);
    let report = PipelineReport::from_batch(&batch)?;
    Ok(report.to_markdown())
}
