use std::fmt;

use thiserror::Error;

use super::model::RawCell;

/// Multiplier applied to values written with a trailing lowercase `k`.
const THOUSANDS: f64 = 1000.0;

/// Why a single raw cell could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedCell {
    #[error("empty value")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' is not a finite number")]
    NotFinite(String),
}

/// Normalise one raw cell to a finite `f64`.
///
/// Order of attempts:
/// 1. numeric cells pass through (integers are widened),
/// 2. text ending in a lowercase `k` is parsed without the suffix and scaled by 1000,
/// 3. any other text is parsed as a plain float.
///
/// Only lowercase `k` scales; `"3K"` or `"2M"` are errors.
pub fn normalize_cell(raw: &RawCell) -> Result<f64, MalformedCell> {
    match raw {
        RawCell::Integer(i) => Ok(*i as f64),
        RawCell::Float(v) => finite(*v, raw),
        RawCell::Text(s) => normalize_text(s),
        RawCell::Null => Err(MalformedCell::Empty),
    }
}

fn normalize_text(s: &str) -> Result<f64, MalformedCell> {
    let s = s.trim();
    if s.is_empty() {
        return Err(MalformedCell::Empty);
    }
    let value = match s.strip_suffix('k') {
        Some(mantissa) => parse_float(mantissa, s)? * THOUSANDS,
        None => parse_float(s, s)?,
    };
    finite(value, &s)
}

fn parse_float(text: &str, original: &str) -> Result<f64, MalformedCell> {
    // `f64::from_str` also accepts "inf" / "NaN"; those are caught by `finite`.
    text.parse::<f64>()
        .map_err(|_| MalformedCell::NotANumber(original.to_string()))
}

fn finite(value: f64, original: &dyn fmt::Display) -> Result<f64, MalformedCell> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MalformedCell::NotFinite(original.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    #[test]
    fn k_suffix_scales_by_one_thousand() {
        assert_eq!(normalize_cell(&text("45k")), Ok(45000.0));
        assert_eq!(normalize_cell(&text("3.2k")), Ok(3200.0));
        assert_eq!(normalize_cell(&text("-1.5k")), Ok(-1500.0));
    }

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(normalize_cell(&text("1000")), Ok(1000.0));
        assert_eq!(normalize_cell(&text(" 12.5 ")), Ok(12.5));
        assert_eq!(normalize_cell(&RawCell::Integer(1000)), Ok(1000.0));
        assert_eq!(normalize_cell(&RawCell::Float(0.25)), Ok(0.25));
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert_eq!(
            normalize_cell(&text("abc")),
            Err(MalformedCell::NotANumber("abc".to_string()))
        );
        assert!(normalize_cell(&text("k")).is_err());
        assert!(normalize_cell(&text("2kk")).is_err());
    }

    #[test]
    fn suffix_is_case_sensitive_and_only_k() {
        assert!(normalize_cell(&text("3K")).is_err());
        assert!(normalize_cell(&text("2M")).is_err());
    }

    #[test]
    fn empty_and_null_are_errors() {
        assert_eq!(normalize_cell(&text("")), Err(MalformedCell::Empty));
        assert_eq!(normalize_cell(&text("   ")), Err(MalformedCell::Empty));
        assert_eq!(normalize_cell(&RawCell::Null), Err(MalformedCell::Empty));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(matches!(
            normalize_cell(&text("nan")),
            Err(MalformedCell::NotFinite(_))
        ));
        assert!(matches!(
            normalize_cell(&text("infk")),
            Err(MalformedCell::NotFinite(_))
        ));
        assert!(normalize_cell(&RawCell::Float(f64::NAN)).is_err());
        assert!(normalize_cell(&text("1e308k")).is_err());
    }

    #[test]
    fn normalizing_is_idempotent_on_its_output() {
        for raw in [text("45k"), text("3.2k"), text("1000"), RawCell::Integer(7)] {
            let once = normalize_cell(&raw).unwrap();
            let twice = normalize_cell(&RawCell::Float(once)).unwrap();
            assert_eq!(once, twice);
            assert_eq!(normalize_cell(&raw).unwrap(), once);
        }
    }
}
