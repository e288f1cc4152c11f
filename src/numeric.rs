//! Small numeric helpers shared by every calculator.

use crate::error::{CalcError, CalcResult};

/// Standard cable conductor cross-sections (mm²).
pub const STANDARD_CROSS_SECTIONS: [f64; 11] = [
    10.0, 16.0, 25.0, 35.0, 50.0, 70.0, 95.0, 120.0, 150.0, 185.0, 240.0,
];

/// Rounds `value` to `digits` decimal places, halves away from zero.
///
/// # Examples
///
/// ```
/// use energy_calc::numeric::round_to;
///
/// assert_eq!(round_to(0.125, 2), 0.13);
/// assert_eq!(round_to(-0.125, 2), -0.13);
/// assert_eq!(round_to(1234.5, 0), 1235.0);
/// ```
pub fn round_to(value: f64, digits: i32) -> f64 {
    let ratio = 10_f64.powi(digits);
    (value * ratio).round() / ratio
}

/// Parses a decimal number written with either `.` or `,` as separator.
///
/// Returns `None` for empty or unparsable input.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok()
}

/// Returns the element of `sizes` closest to `value`.
///
/// Ties keep the earliest element.
///
/// # Errors
///
/// Returns `CalcError::InvalidInput` if `sizes` is empty.
pub fn snap_to_standard(value: f64, sizes: &[f64]) -> CalcResult<f64> {
    let (&first, rest) = sizes
        .split_first()
        .ok_or_else(|| CalcError::invalid("sizes"))?;

    let mut closest = first;
    let mut min_diff = (value - first).abs();
    for &size in rest {
        let diff = (value - size).abs();
        if diff < min_diff {
            min_diff = diff;
            closest = size;
        }
    }
    Ok(closest)
}
