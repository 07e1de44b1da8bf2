use serde::{Deserialize, Serialize};

use crate::error::JsonbError;

/// Comparison operators accepted by the predicate compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Greater than (>)
    Gt,
    /// Less than (<)
    Lt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than or equal (<=)
    Lte,
    /// Equal (=)
    Eq,
    /// JSONB contains (@>)
    Contains,
}

impl Operator {
    /// Resolve a user-facing operator token to its canonical operator.
    ///
    /// Accepts shorthand and symbolic spellings (`gt`, `>`, `:gt`),
    /// case-insensitively. Unknown tokens fail with
    /// [`JsonbError::InvalidOperator`].
    pub fn parse(token: &str) -> Result<Self, JsonbError> {
        let spelling = token.trim().trim_start_matches(':').to_ascii_lowercase();
        match spelling.as_str() {
            "gt" | ">" => Ok(Operator::Gt),
            "lt" | "<" => Ok(Operator::Lt),
            "gte" | ">=" => Ok(Operator::Gte),
            "lte" | "<=" => Ok(Operator::Lte),
            "eq" | "=" => Ok(Operator::Eq),
            "contains" | "@>" => Ok(Operator::Contains),
            _ => Err(JsonbError::InvalidOperator(token.to_string())),
        }
    }

    /// True exactly for the ordered comparisons, which compare under a
    /// `float` cast; `=` and `@>` compare under a `jsonb` cast.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Lt | Operator::Gte | Operator::Lte
        )
    }

    /// The cast type applied to both sides when no override is given.
    pub fn default_cast(self) -> &'static str {
        if self.is_numeric() { "float" } else { "jsonb" }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Gt => write!(f, ">"),
            Operator::Lt => write!(f, "<"),
            Operator::Gte => write!(f, ">="),
            Operator::Lte => write!(f, "<="),
            Operator::Eq => write!(f, "="),
            Operator::Contains => write!(f, "@>"),
        }
    }
}

impl std::str::FromStr for Operator {
    type Err = JsonbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::parse(s)
    }
}

/// Sort order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse an ordering token; only `asc` and `desc` are accepted.
    pub fn parse(token: &str) -> Result<Self, JsonbError> {
        match token.trim().trim_start_matches(':') {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(JsonbError::InvalidDirection(token.to_string())),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}
