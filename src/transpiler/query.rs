//! Predicate and ordering compiler.
//!
//! Builds boolean WHERE fragments and ORDER BY expressions that traverse
//! nested document paths with type-aware casts.
//!
//! A path that does not exist on a row traverses to SQL NULL, and a cast
//! NULL compares as unknown under every operator. Exclusion queries built
//! from path-qualified predicates therefore also exclude rows lacking the
//! path, while full-document contains-exclusion does not. That asymmetry is
//! intentional and must not be papered over with null-coalescing.

use serde_json::Value as Json;

use crate::ast::{Operator, SortOrder, SqlValue};
use crate::error::JsonbError;
use crate::quoting::quote;
use crate::schema::TableDef;
use crate::transpiler::json_path_lhs;

/// Builder for one jsonb WHERE fragment.
///
/// # Example
/// ```
/// use atomic_jsonb::{TableDef, WhereClause};
///
/// let table = TableDef::new("friends").jsonb("props");
/// let clause = WhereClause::new(&table, "props")
///     .key("age")
///     .op("gt")
///     .value(20)
///     .to_sql()
///     .unwrap();
/// assert_eq!(clause, r#"("friends"."props" -> 'age')::float > (20)::float"#);
/// ```
#[derive(Debug, Clone)]
pub struct WhereClause<'a> {
    table: &'a TableDef,
    column: String,
    keys: Vec<String>,
    operator: String,
    value: Json,
    cast: Option<String>,
}

impl<'a> WhereClause<'a> {
    /// Start a clause against `column`, defaulting to the `=` operator and a
    /// NULL comparison value.
    pub fn new(table: &'a TableDef, column: impl Into<String>) -> Self {
        Self {
            table,
            column: column.into(),
            keys: Vec::new(),
            operator: "=".to_string(),
            value: Json::Null,
            cast: None,
        }
    }

    /// Append one path key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Append several path keys.
    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Set the operator token (any accepted alias spelling).
    pub fn op(mut self, token: impl Into<String>) -> Self {
        self.operator = token.into();
        self
    }

    /// Set the right-hand comparison value.
    pub fn value(mut self, value: impl Into<Json>) -> Self {
        self.value = value.into();
        self
    }

    /// Override the cast type applied to both sides.
    pub fn cast(mut self, typ: impl Into<String>) -> Self {
        self.cast = Some(typ.into());
        self
    }

    /// Compile to `(<lhs>)::<cast> <op> (<rhs>)::<cast>`.
    ///
    /// Negation is a query-composition concern and is never emitted here;
    /// see [`jsonb_where_not`].
    pub fn to_sql(&self) -> Result<String, JsonbError> {
        let column = self.table.resolve_alias(&self.column);
        self.table.validate_jsonb_column(column)?;
        let operator = Operator::parse(&self.operator)?;

        let lhs = json_path_lhs(&self.table.name, column, &self.keys)?;
        let rhs = if operator.is_numeric() {
            // Only scalars compare numerically; strings go through full
            // literal escaping, composites cannot be rendered here.
            match &self.value {
                Json::Array(_) => return Err(JsonbError::UnsupportedLiteralType("array")),
                Json::Object(_) => return Err(JsonbError::UnsupportedLiteralType("object")),
                scalar => quote(&SqlValue::from(scalar))?,
            }
        } else {
            quote(&SqlValue::Text(self.value.to_string()))?
        };
        let cast = self.cast.as_deref().unwrap_or(operator.default_cast());

        Ok(format!("({lhs})::{cast} {operator} ({rhs})::{cast}"))
    }
}

/// One-shot predicate compilation.
pub fn jsonb_where<S: AsRef<str>>(
    table: &TableDef,
    column: &str,
    keys: &[S],
    operator: &str,
    value: impl Into<Json>,
) -> Result<String, JsonbError> {
    WhereClause::new(table, column)
        .keys(keys.iter().map(AsRef::as_ref))
        .op(operator)
        .value(value)
        .to_sql()
}

/// Negated predicate: wraps the compiled clause in `NOT (…)`.
pub fn jsonb_where_not<S: AsRef<str>>(
    table: &TableDef,
    column: &str,
    keys: &[S],
    operator: &str,
    value: impl Into<Json>,
) -> Result<String, JsonbError> {
    let clause = jsonb_where(table, column, keys, operator, value)?;
    Ok(format!("NOT ({clause})"))
}

/// Compile an ORDER BY expression over a document path.
///
/// No cast is applied: ordering relies on jsonb's default comparison, under
/// which absent paths (NULL) sort first descending and last ascending.
pub fn jsonb_order<S: AsRef<str>>(
    table: &TableDef,
    column: &str,
    keys: &[S],
    direction: &str,
) -> Result<String, JsonbError> {
    let column = table.resolve_alias(column);
    table.validate_jsonb_column(column)?;
    if keys.is_empty() {
        return Err(JsonbError::EmptyOrderPath);
    }
    let direction = SortOrder::parse(direction)?;

    let keys: Vec<String> = keys.iter().map(|k| k.as_ref().to_string()).collect();
    let lhs = json_path_lhs(&table.name, column, &keys)?;
    Ok(format!("({lhs}) {direction}"))
}
