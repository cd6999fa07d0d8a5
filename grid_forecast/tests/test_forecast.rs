use approx::assert_abs_diff_eq;
use chrono::DateTime;
use grid_forecast::forecast::{forecast_batch, ForecastCalculation, ForecastResult, Reliability};
use grid_forecast::ValidatedRecord;
use rstest::rstest;

fn record(historical: f64, a: f64, b: f64, time: u64, baseline: f64) -> ValidatedRecord {
    ValidatedRecord {
        timestamp: "2023-06-01T00:00:00Z".to_string(),
        observed_at: DateTime::parse_from_rfc3339("2023-06-01T00:00:00Z").unwrap(),
        historical_energy_consumption: historical,
        parameter_a: a,
        parameter_b: b,
        forecast_time: time,
        baseline,
    }
}

#[rstest]
#[case(record(100.0, 1.1, 0.5, 20, 50.0))]
#[case(record(120.0, 1.2, 0.55, 15, 55.0))]
#[case(record(0.3, 7.25, 0.01, 1, 0.7))]
#[case(record(1e6, 0.9, 12.5, 48, 3.0))]
fn test_prediction_is_linear(#[case] input: ValidatedRecord) {
    let result = ForecastResult::compute(&input).unwrap();
    let expected = input.baseline
        + input.historical_energy_consumption * input.parameter_a
        + input.parameter_b * input.forecast_time as f64;

    assert_abs_diff_eq!(result.predicted_energy(), expected, epsilon = 0.01);
    let calc = result.unrounded();
    assert_eq!(calc.confidence_score, 100.0 - calc.relative_error);
}

#[test]
fn test_reference_payload_figures() {
    let results: Vec<(f64, f64, f64, Reliability)> = [
        record(100.0, 1.1, 0.5, 20, 50.0),
        record(120.0, 1.2, 0.55, 15, 55.0),
    ]
    .iter()
    .map(|input| {
        let r = ForecastResult::compute(input).unwrap();
        (r.predicted_energy(), r.relative_error(), r.confidence_score(), r.status())
    })
    .collect();

    assert_eq!(results[0], (170.0, 70.0, 30.0, Reliability::LowReliability));
    assert_eq!(results[1], (207.25, 72.71, 27.29, Reliability::LowReliability));
}

#[rstest]
#[case(record(100.0, 0.5, 0.5, 10, 50.0), Reliability::HighlyReliable)]
#[case(record(100.0, 0.5, 0.5, 10, 60.0), Reliability::ModeratelyReliable)]
#[case(record(100.0, 0.5, 0.5, 10, 40.0), Reliability::HighlyReliable)]
#[case(record(100.0, 0.5, 0.5, 10, 80.0), Reliability::LowReliability)]
fn test_reliability_classes(#[case] input: ValidatedRecord, #[case] expected: Reliability) {
    assert_eq!(ForecastResult::compute(&input).unwrap().status(), expected);
}

#[test]
fn test_classification_edges() {
    assert_eq!(Reliability::classify(10.0, 90.0), Reliability::HighlyReliable);
    assert_eq!(Reliability::classify(10.01, 89.99), Reliability::ModeratelyReliable);
    assert_eq!(Reliability::classify(25.0, 85.0), Reliability::ModeratelyReliable);
    assert_eq!(Reliability::classify(150.0, -50.0), Reliability::LowReliability);
}

#[test]
fn test_zero_observation_is_an_error() {
    let input = record(0.0, 1.0, 1.0, 1, 1.0);
    assert!(ForecastCalculation::compute(&input).is_err());
    assert!(forecast_batch(std::slice::from_ref(&input)).is_err());
}
