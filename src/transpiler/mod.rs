//! SQL fragment compilers for JSONB columns.
//!
//! [`update`] turns a nested payload into a single atomic `UPDATE`
//! statement built from chained `jsonb_set` calls; [`query`] builds
//! WHERE and ORDER BY fragments that traverse document paths.

pub mod query;
pub mod update;

#[cfg(test)]
mod tests;

pub use query::{WhereClause, jsonb_order, jsonb_where, jsonb_where_not};
pub use update::build_update_query;

use crate::ast::SqlValue;
use crate::quoting::{quote, quote_identifier};

/// Left-hand side of a path traversal: `"table"."column" -> 'k1' -> 'k2'`.
///
/// Keys are quoted as literals, not identifiers; jsonb path traversal takes
/// value-typed keys.
pub(crate) fn json_path_lhs(
    table: &str,
    column: &str,
    keys: &[String],
) -> Result<String, crate::error::JsonbError> {
    let mut parts = vec![format!(
        "{}.{}",
        quote_identifier(table),
        quote_identifier(column)
    )];
    for key in keys {
        parts.push(quote(&SqlValue::Text(key.clone()))?);
    }
    Ok(parts.join(" -> "))
}
