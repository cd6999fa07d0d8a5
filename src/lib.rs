//! # Smart Grid Workspace
//!
//! Umbrella crate for the smart grid energy forecasting libraries.
//!
//! - [`grid_forecast`]: ingestion, validation, forecasting and reporting
//! - [`grid_math`]: rounding, number display and error metrics
//!
//! ## Example
//!
//! ```
//! use smart_grid_workspace::grid_forecast::{validate_input, Reliability};
//!
//! let csv = "timestamp,historical_energy_consumption,parameter_a,parameter_b,forecast_time,baseline
//! 2023-06-01T00:00:00Z,100,0.5,0.5,10,50";
//!
//! let batch = validate_input(csv);
//! let forecasts = batch.forecasts().unwrap();
//! assert_eq!(forecasts[0].predicted_energy(), 105.0);
//! assert_eq!(forecasts[0].status(), Reliability::HighlyReliable);
//! ```

pub use grid_forecast;
pub use grid_math;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_crates_are_reachable() {
        assert_eq!(grid_forecast::NAME, "grid_forecast");
        assert_eq!(grid_math::display_number(105.0), "105.0");
    }
}
