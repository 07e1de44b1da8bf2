use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use uuid::Uuid;

/// A literal value the quoter knows how to render as SQL text.
///
/// Every accepted kind is an explicit variant, so adding a new literal kind
/// is a compile-time exercise rather than a runtime type error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Bool(bool),
    /// Integers are carried as i128 so out-of-range values can be detected
    /// against the signed 64-bit envelope instead of failing to construct.
    Int(i128),
    Float(f64),
    /// Arbitrary-precision decimal, rendered in fixed-point notation.
    Decimal(Decimal),
    Text(String),
    /// Timestamp, normalized to UTC before formatting.
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    /// Half-open or closed range, e.g. `[1,10)`.
    Range(Box<SqlRange>),
    /// A type's display name, quoted as a string.
    TypeName(String),
    /// A JSON document, rendered via its serialized text form.
    Json(Json),
}

/// Range bounds for [`SqlValue::Range`]. `None` means unbounded on that end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlRange {
    pub start: Option<SqlValue>,
    pub end: Option<SqlValue>,
    /// Whether the upper bound is included (`]`) or excluded (`)`).
    pub inclusive_end: bool,
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value.into())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value.into())
    }
}

impl From<i128> for SqlValue {
    fn from(value: i128) -> Self {
        SqlValue::Int(value)
    }
}

impl From<u64> for SqlValue {
    fn from(value: u64) -> Self {
        SqlValue::Int(value.into())
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        SqlValue::Decimal(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        SqlValue::Uuid(value)
    }
}

impl From<SqlRange> for SqlValue {
    fn from(value: SqlRange) -> Self {
        SqlValue::Range(Box::new(value))
    }
}

impl From<&Json> for SqlValue {
    fn from(value: &Json) -> Self {
        match value {
            Json::Null => SqlValue::Null,
            Json::Bool(b) => SqlValue::Bool(*b),
            Json::String(s) => SqlValue::Text(s.clone()),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SqlValue::Int(i.into())
                } else if let Some(u) = n.as_u64() {
                    SqlValue::Int(u.into())
                } else if let Some(f) = n.as_f64() {
                    SqlValue::Float(f)
                } else {
                    SqlValue::Json(value.clone())
                }
            }
            other => SqlValue::Json(other.clone()),
        }
    }
}

impl From<Json> for SqlValue {
    fn from(value: Json) -> Self {
        SqlValue::from(&value)
    }
}
