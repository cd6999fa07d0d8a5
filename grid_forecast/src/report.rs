//! Markdown rendering of validation and forecast results

use crate::forecast::ForecastResult;
use crate::validation::ValidationOutcome;
use grid_math::{display_number, round_to};
use std::fmt::{self, Display, Formatter};

const SUCCESS_MESSAGE: &str = "Data validation is successful! Would you like to proceed with the forecast analysis or provide another dataset?";

/// Validation summary document
#[derive(Debug, Clone, Copy)]
pub struct ValidationReport<'a>(pub &'a ValidationOutcome);

impl Display for ValidationReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        writeln!(f, "# Smart Grid Data Validation Report:")?;
        writeln!(f, "- Total Records Evaluated: {}", outcome.total_records())?;
        writeln!(f, "## Required Fields Check:")?;
        for (field, status) in outcome.fields_status().iter() {
            writeln!(f, "   - {}: {}", field, status)?;
        }

        writeln!(f)?;
        writeln!(f, "# Validation Summary:")?;
        if outcome.is_clean() {
            writeln!(f, "{}", SUCCESS_MESSAGE)?;
        } else {
            for error in outcome.errors() {
                writeln!(f, "- {}", error)?;
            }
        }
        Ok(())
    }
}

/// Detailed forecast document, one section per result
#[derive(Debug, Clone, Copy)]
pub struct ForecastReport<'r, 'a>(pub &'r [ForecastResult<'a>]);

impl Display for ForecastReport<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Smart Grid Energy Consumption Forecast Summary")?;
        writeln!(f)?;
        writeln!(f, "**Total Records Evaluated:** {}", self.0.len())?;
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)?;

        for result in self.0 {
            write_section(f, result)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut Formatter<'_>, result: &ForecastResult<'_>) -> fmt::Result {
    let record = result.record();
    let historical = display_number(record.historical_energy_consumption);
    let parameter_a = display_number(record.parameter_a);
    let parameter_b = display_number(record.parameter_b);
    let baseline = display_number(record.baseline);
    let adjusted = display_number(result.adjusted_consumption());
    let time_adjustment = display_number(result.time_adjustment());
    let predicted = display_number(result.predicted_energy());
    let relative_error = display_number(result.relative_error());
    let confidence = display_number(result.confidence_score());

    // Error steps are recomputed from the rounded prediction.
    let difference = result.predicted_energy() - record.historical_energy_consumption;
    let ratio = difference / record.historical_energy_consumption;
    let step_difference = display_number(round_to(difference, 2));
    let step_ratio = display_number(round_to(ratio, 4));
    let step_percent = display_number(round_to(ratio * 100.0, 2));

    writeln!(f, "## Detailed Analysis per Record")?;
    writeln!(f)?;
    writeln!(f, "**Record Identifier:** {}", record.timestamp)?;
    writeln!(f)?;

    writeln!(f, "### Input Data")?;
    writeln!(f, "- **Historical Energy Consumption:** {}", historical)?;
    writeln!(f, "- **Parameter A:** {}", parameter_a)?;
    writeln!(f, "- **Parameter B:** {}", parameter_b)?;
    writeln!(f, "- **Forecast Time (hours):** {}", record.forecast_time)?;
    writeln!(f, "- **Baseline Consumption:** {}", baseline)?;
    writeln!(f)?;

    writeln!(f, "---")?;
    writeln!(f)?;
    writeln!(f, "## Detailed Calculations")?;
    writeln!(f)?;

    writeln!(f, "### 1. Adjusted Consumption Calculation")?;
    writeln!(
        f,
        r"- **Formula:** $$ \text{{Adjusted Consumption}} = \text{{historical_energy_consumption}} \times \text{{parameter_a}} $$"
    )?;
    writeln!(f, "- **Steps:** Multiply historical_energy_consumption by parameter_a.")?;
    writeln!(f, r"  - ${} \times {} = {}$", historical, parameter_a, adjusted)?;
    writeln!(f, "- **Final Adjusted Consumption:** **{}**", adjusted)?;
    writeln!(f)?;

    writeln!(f, "### 2. Time Adjustment Calculation")?;
    writeln!(
        f,
        r"- **Formula:** $$ \text{{Time Adjustment}} = \text{{parameter_b}} \times \text{{forecast_time}} $$"
    )?;
    writeln!(f, "- **Steps:** Multiply parameter_b by forecast_time.")?;
    writeln!(
        f,
        r"  - ${} \times {} = {}$",
        parameter_b, record.forecast_time, time_adjustment
    )?;
    writeln!(f, "- **Final Time Adjustment:** **{}**", time_adjustment)?;
    writeln!(f)?;

    writeln!(f, "### 3. Predicted Energy Consumption Calculation")?;
    writeln!(
        f,
        r"- **Formula:** $$ \text{{Predicted Energy}} = \text{{baseline}} + \text{{Adjusted Consumption}} + \text{{Time Adjustment}} $$"
    )?;
    writeln!(f, "- **Steps:** Sum baseline, Adjusted Consumption, and Time Adjustment.")?;
    writeln!(
        f,
        "  - ${} + {} + {} = {}$",
        baseline, adjusted, time_adjustment, predicted
    )?;
    writeln!(f, "- **Final Predicted Energy:** **{}**", predicted)?;
    writeln!(f)?;

    writeln!(f, "### 4. Relative Error Calculation")?;
    writeln!(
        f,
        r"- **Formula:** $$ \text{{Relative Error (\%)}} = \left|\frac{{\text{{Predicted Energy}} - \text{{historical_energy_consumption}}}}{{\text{{historical_energy_consumption}}}}\right| \times 100 $$"
    )?;
    writeln!(f, "- **Steps:**")?;
    writeln!(f, "  1. Subtract historical_energy_consumption from Predicted Energy.")?;
    writeln!(
        f,
        "     - ${} - {} = {}$",
        predicted, historical, step_difference
    )?;
    writeln!(f, "  2. Divide the result by historical_energy_consumption.")?;
    writeln!(
        f,
        r"     - ${} \div {} = {}$",
        step_difference, historical, step_ratio
    )?;
    writeln!(f, "  3. Multiply by 100.")?;
    writeln!(f, r"     - ${} \times 100 = {}$", step_ratio, step_percent)?;
    writeln!(f, "  4. Take the absolute value.")?;
    writeln!(f, "     - $|{}| = {}$", step_percent, relative_error)?;
    writeln!(f, "- **Final Relative Error:** **{} %**", relative_error)?;
    writeln!(f)?;

    writeln!(f, "### 5. Forecast Confidence Score Calculation")?;
    writeln!(
        f,
        r"- **Formula:** $$ \text{{Confidence Score}} = 100 - \text{{Relative Error (\%)}} $$"
    )?;
    writeln!(f, "- **Steps:** Subtract the Relative Error from 100.")?;
    writeln!(f, "  - $100 - {} = {}$", relative_error, confidence)?;
    writeln!(f, "- **Final Confidence Score:** **{}**", confidence)?;
    writeln!(f)?;

    writeln!(f, "---")?;
    writeln!(f)?;
    writeln!(f, "## Final Recommendation")?;
    writeln!(f)?;
    writeln!(f, "- **Relative Error:** **{} %**", relative_error)?;
    writeln!(f, "- **Confidence Score:** **{}**", confidence)?;
    writeln!(f, "- **Status:** {}", result.status())?;
    writeln!(f, "- **Recommended Action:** {}", result.recommendation())?;
    writeln!(f)?;
    Ok(())
}

/// Render the validation summary
pub fn render_validation_report(outcome: &ValidationOutcome) -> String {
    ValidationReport(outcome).to_string()
}

/// Render the per-record forecast detail
pub fn render_forecast_report(results: &[ForecastResult<'_>]) -> String {
    ForecastReport(results).to_string()
}

/// Validation summary, followed by the forecast detail when any record passed
pub fn render_document(outcome: &ValidationOutcome, results: &[ForecastResult<'_>]) -> String {
    let validation = render_validation_report(outcome);
    if results.is_empty() {
        return validation;
    }
    format!("{}\n\n{}", validation, render_forecast_report(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_outcome_reports_success() {
        let outcome = ValidationOutcome::new();
        let expected = "\
# Smart Grid Data Validation Report:
- Total Records Evaluated: 0
## Required Fields Check:
   - timestamp: missing
   - historical_energy_consumption: invalid
   - parameter_a: invalid
   - parameter_b: invalid
   - forecast_time: invalid
   - baseline: invalid

# Validation Summary:
Data validation is successful! Would you like to proceed with the forecast analysis or provide another dataset?
";
        assert_eq!(render_validation_report(&outcome), expected);
    }

    #[test]
    fn no_results_means_no_forecast_section() {
        let outcome = ValidationOutcome::new();
        assert_eq!(
            render_document(&outcome, &[]),
            render_validation_report(&outcome)
        );
    }

    #[test]
    fn empty_forecast_report_has_header_only() {
        let report = render_forecast_report(&[]);
        assert!(report.starts_with("# Smart Grid Energy Consumption Forecast Summary\n\n"));
        assert!(report.contains("**Total Records Evaluated:** 0"));
        assert!(!report.contains("## Detailed Analysis per Record"));
    }
}
