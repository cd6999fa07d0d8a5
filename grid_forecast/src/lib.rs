//! # Grid Forecast
//!
//! Validation, linear forecasting and markdown reporting for smart grid
//! energy usage records.
//!
//! ## Pipeline
//!
//! - **Ingestion**: detect JSON (`{"records": [...]}`) or comma separated
//!   text and parse it into raw records
//! - **Validation**: check each required field, accumulate per-field
//!   statuses and error messages, coerce fully valid rows
//! - **Forecast**: apply the linear consumption model and classify
//!   reliability
//! - **Reporting**: render the validation summary and forecast detail as
//!   markdown
//!
//! ## Quick Start
//!
//! ```rust
//! use grid_forecast::pipeline::process;
//!
//! let input = r#"{"records": [{
//!     "timestamp": "2023-06-01T00:00:00Z",
//!     "historical_energy_consumption": 100,
//!     "parameter_a": 1.1,
//!     "parameter_b": 0.5,
//!     "forecast_time": 20,
//!     "baseline": 50
//! }]}"#;
//!
//! let document = process(input)?;
//! assert!(document.contains("- **Status:** Low Reliability"));
//! # Ok::<(), grid_forecast::ForecastError>(())
//! ```

pub mod data;
pub mod error;
pub mod forecast;
pub mod pipeline;
pub mod report;
pub mod validation;

// Re-export commonly used types
pub use crate::data::{DataLoader, InputFormat, RawRecord, RawValue};
pub use crate::error::{FieldProblem, ForecastError};
pub use crate::forecast::{ForecastResult, Reliability};
pub use crate::pipeline::{process, validate_input, PipelineReport, ValidatedBatch};
pub use crate::validation::{Field, FieldStatus, ValidatedRecord, ValidationOutcome};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
