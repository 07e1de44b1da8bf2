//! SQLx execution channel.
//!
//! Compile, then run the one resulting statement. Transaction scope,
//! retries, and pooling stay with the caller; driver errors pass through
//! unmodified as [`JsonbError::Database`].
//!
//! # Example
//! ```no_run
//! use atomic_jsonb::{RecordHandle, TableDef};
//! use serde_json::json;
//! use sqlx::PgPool;
//!
//! async fn example(pool: &PgPool) -> Result<(), atomic_jsonb::JsonbError> {
//!     let table = TableDef::new("friends").jsonb("props").column("updated_at", "timestamp");
//!     let record = RecordHandle::persisted(1i64, table);
//!     let rows = atomic_jsonb::executor::jsonb_update(pool, &record, &json!({
//!         "props": { "age": 21 }
//!     })).await?;
//!     assert_eq!(rows, 1);
//!     Ok(())
//! }
//! ```

use serde_json::Value as Json;
use sqlx::PgPool;

use crate::error::JsonbError;
use crate::schema::RecordHandle;
use crate::transpiler::build_update_query;

/// Execute one pre-compiled statement, returning the affected row count.
pub async fn exec_update(pool: &PgPool, sql: &str) -> Result<u64, JsonbError> {
    let done = sqlx::query(sql).execute(pool).await?;
    Ok(done.rows_affected())
}

/// Compile and execute an atomic merge, touching `updated_at` when the
/// table has one.
pub async fn jsonb_update(
    pool: &PgPool,
    record: &RecordHandle,
    payload: &Json,
) -> Result<u64, JsonbError> {
    let sql = build_update_query(record, payload, true)?;
    exec_update(pool, &sql).await
}

/// Compile and execute without touch semantics: no `updated_at` bump, no
/// lifecycle side effects beyond the merge itself.
pub async fn jsonb_update_columns(
    pool: &PgPool,
    record: &RecordHandle,
    payload: &Json,
) -> Result<u64, JsonbError> {
    let sql = build_update_query(record, payload, false)?;
    exec_update(pool, &sql).await
}
