//! Atomic JSONB partial updates and path queries for PostgreSQL.
//!
//! Merges a nested payload into a jsonb column with a single `UPDATE`
//! statement built from chained `jsonb_set` calls, so concurrent writers to
//! disjoint paths never lose data. Also compiles WHERE and ORDER BY
//! fragments that traverse document paths with type-aware casts.
//!
//! All values are inlined through the quoting layer; the emitted text uses
//! no parameter placeholders and is ready for verbatim execution.
//!
//! # Example
//! ```
//! use atomic_jsonb::{RecordHandle, TableDef, build_update_query, jsonb_where};
//! use serde_json::json;
//!
//! let table = TableDef::new("friends")
//!     .column("id", "bigint")
//!     .jsonb("props");
//!
//! let record = RecordHandle::persisted(1i64, table.clone());
//! let sql = build_update_query(&record, &json!({"props": {"age": 21}}), false).unwrap();
//! assert_eq!(
//!     sql,
//!     r#"UPDATE "friends" SET "props" = jsonb_set("props"::jsonb, '{age}', '21')::jsonb WHERE id = 1;"#
//! );
//!
//! let clause = jsonb_where(&table, "props", &["age"], "gt", 20).unwrap();
//! assert_eq!(clause, r#"("friends"."props" -> 'age')::float > (20)::float"#);
//! ```

pub mod ast;
pub mod error;
pub mod executor;
pub mod quoting;
pub mod schema;
pub mod transpiler;

pub use ast::{Operator, SortOrder, SqlRange, SqlValue};
pub use error::JsonbError;
pub use quoting::QuotePolicy;
pub use schema::{ColumnDef, LifecycleState, RecordHandle, TableDef};
pub use transpiler::{
    WhereClause, build_update_query, jsonb_order, jsonb_where, jsonb_where_not,
};
