//! PostgreSQL literal and identifier quoting.
//!
//! Every value interpolated into generated SQL goes through [`quote`]; no
//! parameter placeholders are used anywhere in this crate.

use chrono::{DateTime, Timelike, Utc};
use serde_json::Value as Json;

use crate::ast::{SqlRange, SqlValue};
use crate::error::JsonbError;

/// Policy knobs for literal quoting.
#[derive(Debug, Clone, Copy)]
pub struct QuotePolicy {
    /// Reject integers outside the signed 64-bit range. PostgreSQL treats
    /// wider literals as `numeric`, which can defeat bigint index scans.
    pub reject_int_wider_than_64bit: bool,
}

impl Default for QuotePolicy {
    fn default() -> Self {
        Self {
            reject_int_wider_than_64bit: true,
        }
    }
}

/// Quote a literal value under the default policy.
pub fn quote(value: &SqlValue) -> Result<String, JsonbError> {
    quote_with_policy(value, &QuotePolicy::default())
}

/// Quote a literal value as safe SQL text.
pub fn quote_with_policy(value: &SqlValue, policy: &QuotePolicy) -> Result<String, JsonbError> {
    match value {
        SqlValue::Null => Ok("NULL".to_string()),
        SqlValue::Bool(true) => Ok("TRUE".to_string()),
        SqlValue::Bool(false) => Ok("FALSE".to_string()),
        SqlValue::Int(i) => {
            if policy.reject_int_wider_than_64bit
                && (*i > i128::from(i64::MAX) || *i < i128::from(i64::MIN))
            {
                return Err(JsonbError::IntegerRangeExceeded(i.to_string()));
            }
            Ok(i.to_string())
        }
        SqlValue::Float(f) => {
            if f.is_finite() {
                Ok(f.to_string())
            } else if f.is_nan() {
                Ok("'NaN'".to_string())
            } else if f.is_sign_positive() {
                Ok("'Infinity'".to_string())
            } else {
                Ok("'-Infinity'".to_string())
            }
        }
        // Decimal's Display is already fixed-point, never scientific.
        SqlValue::Decimal(d) => Ok(d.to_string()),
        SqlValue::Text(s) => Ok(format!("'{}'", quote_string(s))),
        SqlValue::Timestamp(t) => Ok(format!("'{}'", quoted_timestamp(t))),
        SqlValue::Uuid(u) => Ok(format!("'{u}'")),
        SqlValue::TypeName(name) => Ok(format!("'{name}'")),
        SqlValue::Range(range) => {
            let encoded = encode_range(range)?;
            Ok(format!("'{}'", quote_string(&encoded)))
        }
        SqlValue::Json(json) => Ok(quote_json(json)),
    }
}

/// Escape a string for use inside a single-quoted SQL literal.
///
/// Backslashes are doubled before quotes; the other order would re-escape
/// the output of quote-escaping.
pub fn quote_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "''")
}

/// Quote a column or table name.
///
/// No internal escaping: names are trusted to originate from schema
/// introspection, never from external input.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{name}\"")
}

/// Quote a JSON document literal, e.g. `'{"a":1}'`.
pub fn quote_json(value: &Json) -> String {
    format!("'{value}'")
}

/// Quote a key path for `jsonb_set`, e.g. `'{a,b,c}'`.
pub fn quote_path(keys: &[String]) -> String {
    format!("'{{{}}}'", keys.join(","))
}

/// Canonical timestamp text: UTC, second precision, microseconds appended
/// only when the value carries a non-zero fractional component.
fn quoted_timestamp(t: &DateTime<Utc>) -> String {
    let base = t.format("%Y-%m-%d %H:%M:%S").to_string();
    let micros = t.nanosecond() / 1_000;
    if micros > 0 {
        format!("{base}.{micros:06}")
    } else {
        base
    }
}

/// Encode a range as `[lower,upper)` / `[lower,upper]`; unbounded ends
/// render as empty. The result is quoted as a string by the caller.
fn encode_range(range: &SqlRange) -> Result<String, JsonbError> {
    let start = bound_text(range.start.as_ref())?;
    let end = bound_text(range.end.as_ref())?;
    let close = if range.inclusive_end { ']' } else { ')' };
    Ok(format!("[{start},{end}{close}"))
}

fn bound_text(bound: Option<&SqlValue>) -> Result<String, JsonbError> {
    match bound {
        None => Ok(String::new()),
        Some(value) => cast_text(value),
    }
}

/// Plain, unquoted rendering used inside range encodings.
fn cast_text(value: &SqlValue) -> Result<String, JsonbError> {
    match value {
        SqlValue::Null => Ok(String::new()),
        SqlValue::Bool(b) => Ok(b.to_string()),
        SqlValue::Int(i) => Ok(i.to_string()),
        SqlValue::Float(f) => {
            if f.is_infinite() {
                // Infinite bounds encode as unbounded ends.
                Ok(String::new())
            } else {
                Ok(f.to_string())
            }
        }
        SqlValue::Decimal(d) => Ok(d.to_string()),
        SqlValue::Text(s) => Ok(s.clone()),
        SqlValue::Timestamp(t) => Ok(quoted_timestamp(t)),
        SqlValue::Uuid(u) => Ok(u.to_string()),
        SqlValue::TypeName(name) => Ok(name.clone()),
        SqlValue::Range(_) => Err(JsonbError::UnsupportedLiteralType("range")),
        SqlValue::Json(_) => Err(JsonbError::UnsupportedLiteralType("json")),
    }
}
