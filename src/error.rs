//! Error types for JSONB compilation and execution.

use thiserror::Error;

/// Errors raised while validating input or compiling SQL fragments.
///
/// Every variant except [`JsonbError::Database`] is a non-retryable
/// validation failure raised before any SQL text is produced. Execution
/// errors from the driver pass through [`JsonbError::Database`] unmodified.
#[derive(Debug, Error)]
pub enum JsonbError {
    /// The referenced column is missing from the table or is not jsonb-typed.
    #[error(
        "table {table} does not have jsonb column {column}{suffix}",
        suffix = suggestion_suffix(.suggestion)
    )]
    InvalidColumnName {
        table: String,
        column: String,
        suggestion: Option<String>,
    },

    /// The operator token matched no known alias.
    #[error("invalid operator {0}")]
    InvalidOperator(String),

    /// The ordering direction was neither `asc` nor `desc`.
    #[error("only `asc` or `desc` can be used for ordering, got: {0}")]
    InvalidDirection(String),

    /// Ordering was requested without any JSON keys.
    #[error("order json keys should not be empty")]
    EmptyOrderPath,

    /// A write addressed a column declared readonly.
    #[error("{0} is marked as readonly")]
    ReadOnlyAttribute(String),

    /// The record is not in a writable lifecycle state.
    #[error("cannot update a {0} record")]
    RecordNotWritable(&'static str),

    /// The update payload was not shaped as a mapping where one is required.
    #[error("malformed update payload: {0}")]
    MalformedPayload(String),

    /// A value of a kind the literal quoter cannot render.
    #[error("cannot quote value of kind {0}")]
    UnsupportedLiteralType(&'static str),

    /// An integer literal outside the signed 64-bit envelope.
    ///
    /// PostgreSQL treats such literals as `numeric`, which can force a slow
    /// sequential scan when compared against an integer or bigint column.
    /// Opt out via [`QuotePolicy`](crate::quoting::QuotePolicy) to allow it.
    #[error("integer {0} is outside the range of a signed 64-bit integer")]
    IntegerRangeExceeded(String),

    /// Driver-level execution failure, passed through unmodified.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean `{s}`?)"),
        None => String::new(),
    }
}
