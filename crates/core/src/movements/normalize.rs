//! Numeric normalizer.
//!
//! Aggregates come back from the warehouse as JSON values whose shape
//! depends on the driver: numbers, decimal strings, or `null` for empty
//! sums. Everything numeric in a report passes through here, so responses
//! never carry `null` or a non-finite value where a number is expected.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value as JsonValue;

/// Coerces a nullable, possibly textual value to a number.
///
/// Absent, `null` and unparseable values become zero; fractional and
/// negative inputs are kept as they are.
#[must_use]
pub fn normalize_number(value: Option<&JsonValue>) -> Decimal {
    match value {
        Some(JsonValue::Number(n)) => parse_decimal(&n.to_string()),
        Some(JsonValue::String(s)) => parse_decimal(s.trim()),
        _ => Decimal::ZERO,
    }
}

/// Normalizes a count: truncated toward zero, negatives become zero.
#[must_use]
pub fn normalize_count(value: Option<&JsonValue>) -> u64 {
    normalize_number(value).trunc().to_u64().unwrap_or(0)
}

/// Normalizes an integer column such as a year, month or id.
#[must_use]
pub fn normalize_int(value: Option<&JsonValue>) -> i64 {
    normalize_number(value).trunc().to_i64().unwrap_or(0)
}

fn parse_decimal(text: &str) -> Decimal {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .unwrap_or(Decimal::ZERO)
}
