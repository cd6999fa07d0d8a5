//! Decimal rounding and number display
//!
//! Report figures are rounded to a fixed number of decimal places and then
//! printed in their shortest round-trip form, with a trailing `.0` kept on
//! integral values (`110.0`, `1.1`, `0.0035`).

/// Magnitude above which integral values switch to scientific notation.
const SCIENTIFIC_UPPER: f64 = 1e16;

/// Magnitude below which non-zero values switch to scientific notation.
const SCIENTIFIC_LOWER: f64 = 1e-4;

/// Round `value` to `places` decimal places.
///
/// Rounding is decided on the exact binary value of `value`, so
/// `round_to(2.675, 2)` yields `2.67` (2.675 is stored slightly below the
/// midpoint). Non-finite values are returned unchanged.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    format!("{:.*}", places, value)
        .parse::<f64>()
        .unwrap_or(value)
}

/// Render a float in shortest round-trip form.
///
/// Integral values keep one fractional digit, very large or very small
/// magnitudes use a signed two-digit exponent (`1e-05`, `1e+16`).
pub fn display_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_UPPER || (magnitude != 0.0 && magnitude < SCIENTIFIC_LOWER) {
        return scientific(value);
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn scientific(value: f64) -> String {
    let rendered = format!("{:e}", value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(110.00000000000001, 2, 110.0)]
    #[case(2.675, 2, 2.67)]
    #[case(0.123456, 4, 0.1235)]
    #[case(-3.14159, 2, -3.14)]
    #[case(70.0, 2, 70.0)]
    fn rounds_to_requested_places(#[case] value: f64, #[case] places: usize, #[case] expected: f64) {
        assert_eq!(round_to(value, places), expected);
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }

    #[rstest]
    #[case(100.0, "100.0")]
    #[case(1.1, "1.1")]
    #[case(0.55, "0.55")]
    #[case(-70.0, "-70.0")]
    #[case(0.0, "0.0")]
    #[case(0.00001, "1e-05")]
    #[case(1.5e-7, "1.5e-07")]
    #[case(1e16, "1e+16")]
    #[case(123456.789, "123456.789")]
    fn displays_shortest_round_trip(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(display_number(value), expected);
    }

    #[test]
    fn displays_non_finite_values() {
        assert_eq!(display_number(f64::NAN), "nan");
        assert_eq!(display_number(f64::NEG_INFINITY), "-inf");
    }
}
