use grid_forecast::pipeline::{process, validate_input};
use grid_forecast::report::{render_forecast_report, render_validation_report};
use pretty_assertions::assert_eq;

const SINGLE_RECORD: &str = r#"{
  "records": [
    {
      "timestamp": "2023-06-01T00:00:00Z",
      "historical_energy_consumption": 100,
      "parameter_a": 1.1,
      "parameter_b": 0.5,
      "forecast_time": 20,
      "baseline": 50
    }
  ]
}
"#;

const VALIDATION_SUCCESS: &str = "\
# Smart Grid Data Validation Report:
- Total Records Evaluated: 1
## Required Fields Check:
   - timestamp: present
   - historical_energy_consumption: valid
   - parameter_a: valid
   - parameter_b: valid
   - forecast_time: valid
   - baseline: valid

# Validation Summary:
Data validation is successful! Would you like to proceed with the forecast analysis or provide another dataset?
";

const FORECAST_SECTION: &str = r"# Smart Grid Energy Consumption Forecast Summary

**Total Records Evaluated:** 1

---

## Detailed Analysis per Record

**Record Identifier:** 2023-06-01T00:00:00Z

### Input Data
- **Historical Energy Consumption:** 100.0
- **Parameter A:** 1.1
- **Parameter B:** 0.5
- **Forecast Time (hours):** 20
- **Baseline Consumption:** 50.0

---

## Detailed Calculations

### 1. Adjusted Consumption Calculation
- **Formula:** $$ \text{Adjusted Consumption} = \text{historical_energy_consumption} \times \text{parameter_a} $$
- **Steps:** Multiply historical_energy_consumption by parameter_a.
  - $100.0 \times 1.1 = 110.0$
- **Final Adjusted Consumption:** **110.0**

### 2. Time Adjustment Calculation
- **Formula:** $$ \text{Time Adjustment} = \text{parameter_b} \times \text{forecast_time} $$
- **Steps:** Multiply parameter_b by forecast_time.
  - $0.5 \times 20 = 10.0$
- **Final Time Adjustment:** **10.0**

### 3. Predicted Energy Consumption Calculation
- **Formula:** $$ \text{Predicted Energy} = \text{baseline} + \text{Adjusted Consumption} + \text{Time Adjustment} $$
- **Steps:** Sum baseline, Adjusted Consumption, and Time Adjustment.
  - $50.0 + 110.0 + 10.0 = 170.0$
- **Final Predicted Energy:** **170.0**

### 4. Relative Error Calculation
- **Formula:** $$ \text{Relative Error (\%)} = \left|\frac{\text{Predicted Energy} - \text{historical_energy_consumption}}{\text{historical_energy_consumption}}\right| \times 100 $$
- **Steps:**
  1. Subtract historical_energy_consumption from Predicted Energy.
     - $170.0 - 100.0 = 70.0$
  2. Divide the result by historical_energy_consumption.
     - $70.0 \div 100.0 = 0.7$
  3. Multiply by 100.
     - $0.7 \times 100 = 70.0$
  4. Take the absolute value.
     - $|70.0| = 70.0$
- **Final Relative Error:** **70.0 %**

### 5. Forecast Confidence Score Calculation
- **Formula:** $$ \text{Confidence Score} = 100 - \text{Relative Error (\%)} $$
- **Steps:** Subtract the Relative Error from 100.
  - $100 - 70.0 = 30.0$
- **Final Confidence Score:** **30.0**

---

## Final Recommendation

- **Relative Error:** **70.0 %**
- **Confidence Score:** **30.0**
- **Status:** Low Reliability
- **Recommended Action:** Forecast reliability is low. Further analysis is required.

";

#[test]
fn test_single_record_document_is_exact() {
    let document = process(SINGLE_RECORD).unwrap();
    let expected = format!("{}\n\n{}", VALIDATION_SUCCESS, FORECAST_SECTION);
    assert_eq!(document, expected);
}

#[test]
fn test_sections_render_independently() {
    let batch = validate_input(SINGLE_RECORD);
    let forecasts = batch.forecasts().unwrap();

    assert_eq!(render_validation_report(&batch.outcome), VALIDATION_SUCCESS);
    assert_eq!(render_forecast_report(&forecasts), FORECAST_SECTION);
}

#[test]
fn test_errors_replace_success_message() {
    let document = process("timestamp,baseline\n2023-06-01T00:00:00Z,-4").unwrap();
    let expected = "\
# Smart Grid Data Validation Report:
- Total Records Evaluated: 1
## Required Fields Check:
   - timestamp: present
   - historical_energy_consumption: invalid
   - parameter_a: invalid
   - parameter_b: invalid
   - forecast_time: invalid
   - baseline: invalid

# Validation Summary:
- ERROR: Missing required field(s): historical_energy_consumption, parameter_a, parameter_b, forecast_time in row 1.
- ERROR: Invalid value for field 'baseline' in row 1. Expected positive number.
";
    assert_eq!(document, expected);
}

#[test]
fn test_negative_difference_steps() {
    let input = "timestamp,historical_energy_consumption,parameter_a,parameter_b,forecast_time,baseline
2023-06-01T00:00:00Z,200,0.5,1,5,90";
    let document = process(input).unwrap();

    assert!(document.contains("  - $90.0 + 100.0 + 5.0 = 195.0$\n"));
    assert!(document.contains("     - $195.0 - 200.0 = -5.0$\n"));
    assert!(document.contains("     - $-5.0 \\div 200.0 = -0.025$\n"));
    assert!(document.contains("     - $-0.025 \\times 100 = -2.5$\n"));
    assert!(document.contains("     - $|-2.5| = 2.5$\n"));
    assert!(document.contains("- **Status:** Highly Reliable\n"));
}
