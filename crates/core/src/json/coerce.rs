//! Loose scalar coercions for client-supplied JSON values.
//!
//! Clients send numbers as strings and booleans as numbers, so scalar fields
//! are coerced instead of rejected. Arrays and objects are never coerced.

use serde_json::Value;

fn not_scalar(key: &str) -> String {
    format!("\"{key}\" must be a scalar value")
}

/// Coerces a scalar to a string. `true` becomes `"1"`, `false` and `null` become `""`.
pub(crate) fn to_string(key: &str, value: &Value) -> Result<String, String> {
    match value {
        Value::Null | Value::Bool(false) => Ok(String::new()),
        Value::Bool(true) => Ok("1".to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => Err(not_scalar(key)),
    }
}

/// Coerces a scalar to an integer.
///
/// Floats are truncated, strings contribute their leading (optionally signed)
/// digits and anything without digits is 0. Out-of-range values saturate.
pub(crate) fn to_integer(key: &str, value: &Value) -> Result<i64, String> {
    match value {
        Value::Null | Value::Bool(false) => Ok(0),
        Value::Bool(true) => Ok(1),
        Value::Number(n) => Ok(n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0)),
        Value::String(s) => Ok(leading_integer(s)),
        Value::Array(_) | Value::Object(_) => Err(not_scalar(key)),
    }
}

/// Coerces a scalar to a boolean. `null`, `false`, `0`, `""` and `"0"` are false.
pub(crate) fn to_bool(key: &str, value: &Value) -> Result<bool, String> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => Ok(!(s.is_empty() || s == "0")),
        Value::Array(_) | Value::Object(_) => Err(not_scalar(key)),
    }
}

fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}
