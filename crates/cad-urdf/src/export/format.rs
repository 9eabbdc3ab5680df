//! Number formatting for URDF attribute values

use crate::constants::ORIGIN_SIGNIFICANT_DIGITS;

/// Format a float with its shortest round-trip representation
///
/// Integral values keep a fractional part (`1.0`), exponents are written with
/// a sign and at least two digits (`1e-07`, `1.5e+16`).
pub fn format_float(value: f64) -> String {
    if let Some(special) = format_non_finite(value) {
        return special;
    }
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => format_exponent(mantissa, exponent),
        None => repr,
    }
}

/// Format a float with [`ORIGIN_SIGNIFICANT_DIGITS`] significant digits
///
/// General notation: scientific when the decimal exponent is below -4 or
/// leaves no room for a digit after the point (at least digits - 1), fixed
/// otherwise. Trailing zeros are removed, but fixed notation keeps one digit
/// after the point.
pub fn format_significant(value: f64) -> String {
    format_general(value, ORIGIN_SIGNIFICANT_DIGITS)
}

/// Format three values separated by spaces
pub fn format_triplet(values: [f64; 3], format: fn(f64) -> String) -> String {
    format!(
        "{} {} {}",
        format(values[0]),
        format(values[1]),
        format(values[2])
    )
}

fn format_general(value: f64, digits: usize) -> String {
    if let Some(special) = format_non_finite(value) {
        return special;
    }
    let digits = digits.max(1);
    // Round first so that the exponent accounts for carries (999999.5 -> 1e+06)
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    // Fixed notation always shows a fractional digit, so it only holds
    // digits - 1 integral digits
    if exponent < -4 || exponent >= digits as i32 - 1 {
        let mantissa = trim_fraction(mantissa);
        return format_exponent(mantissa, &exponent.to_string());
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    let fixed = format!("{:.*}", decimals, value);
    let trimmed = trim_fraction(&fixed);
    if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        format!("{trimmed}.0")
    }
}

/// Remove trailing zeros after the decimal point, and the point itself if
/// nothing is left after it
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

fn format_exponent(mantissa: &str, exponent: &str) -> String {
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent.trim_start_matches('+')),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

fn format_non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("nan".to_string())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "inf" } else { "-inf" }.to_string())
    } else {
        None
    }
}
