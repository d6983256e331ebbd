//! Format checks for text-encoded values.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Calendar date in `YYYY-MM-DD` form, semantically valid (no Feb 30th).
pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// RFC 3339, or the local `YYYY-MM-DDTHH:MM[:SS]` form date-time pickers emit.
pub fn is_valid_datetime(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
}

/// Numeric reading of a value: JSON numbers as-is, strings coerced.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// JSON type name of a value, for mismatch messages.
pub fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
