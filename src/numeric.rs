//! Lenient coercion of user-typed numbers.
//!
//! Form fields never reject input. Whatever the user typed is read up to the
//! first character that can't continue a number, and anything unreadable
//! becomes `0`.

use regex::Regex;
use std::sync::LazyLock;

static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("valid integer pattern"));

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("valid decimal pattern")
});

/// Reads the leading integer of `input`, used for quantities.
///
/// `"2.7"` reads as `2`, `"12abc"` as `12`, `""` and `"abc"` as `0`.
pub fn coerce_int(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let value = INT_PREFIX
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);
    zero_if_unset(value)
}

/// Reads the leading decimal literal of `input`, used for rates,
/// percentages and shipping.
pub fn coerce_float(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let value = FLOAT_PREFIX
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);
    zero_if_unset(value)
}

// NaN and negative zero both collapse to a plain zero.
fn zero_if_unset(value: f64) -> f64 {
    if value == 0.0 || value.is_nan() { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_takes_leading_digits_only() {
        assert_eq!(coerce_int("3"), 3.0);
        assert_eq!(coerce_int("  42 "), 42.0);
        assert_eq!(coerce_int("2.7"), 2.0);
        assert_eq!(coerce_int("12abc"), 12.0);
        assert_eq!(coerce_int("-4"), -4.0);
    }

    #[test]
    fn int_without_digits_is_zero() {
        assert_eq!(coerce_int(""), 0.0);
        assert_eq!(coerce_int("abc"), 0.0);
        assert_eq!(coerce_int(".5"), 0.0);
        assert_eq!(coerce_int("-"), 0.0);
    }

    #[test]
    fn float_reads_decimal_prefix() {
        assert_eq!(coerce_float("12.50"), 12.5);
        assert_eq!(coerce_float(".25"), 0.25);
        assert_eq!(coerce_float("5."), 5.0);
        assert_eq!(coerce_float("8.875%"), 8.875);
        assert_eq!(coerce_float("1e3"), 1000.0);
        assert_eq!(coerce_float("2e"), 2.0);
        assert_eq!(coerce_float("-3.5"), -3.5);
    }

    #[test]
    fn float_garbage_is_zero_not_error() {
        assert_eq!(coerce_float("abc"), 0.0);
        assert_eq!(coerce_float(""), 0.0);
        assert_eq!(coerce_float("$10"), 0.0);
        assert_eq!(coerce_float("NaN"), 0.0);
    }

    #[test]
    fn negative_zero_becomes_plain_zero() {
        assert!(coerce_float("-0").is_sign_positive());
        assert!(coerce_int("-0").is_sign_positive());
    }

    #[test]
    fn only_ascii_digits_count() {
        assert_eq!(coerce_int("3\u{0663}"), 3.0);
        assert_eq!(coerce_float("1.5\u{0663}"), 1.5);
        assert_eq!(coerce_float("\u{0663}"), 0.0);
    }

    #[test]
    fn infinity_is_kept() {
        assert_eq!(coerce_float("Infinity"), f64::INFINITY);
        assert_eq!(coerce_float("-Infinity"), f64::NEG_INFINITY);
    }
}
