// src/utils/percent.rs

use crate::config::PASS_MARK_PERCENT;

/// Rounds a value to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ratio of `part` to `whole` as a percentage with two decimal places.
/// Returns 0 when `whole` is zero.
pub fn ratio_percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    ((part as f64 / whole as f64) * 10000.0).round() / 100.0
}

/// Minimum score needed to pass: `PASS_MARK_PERCENT` of the total marks, rounded up.
pub fn pass_threshold(total_marks: i64) -> i64 {
    // Equivalent to `(total_marks * PASS_MARK_PERCENT).div_ceil(100)`, written with
    // stable arithmetic because signed `i64::div_ceil` is still unstable.
    let numerator = total_marks * PASS_MARK_PERCENT;
    let quotient = numerator / 100;
    let remainder = numerator % 100;
    if remainder > 0 {
        quotient + 1
    } else {
        quotient
    }
}
