//! Atomic update compiler.
//!
//! Compiles a nested payload into one `UPDATE` statement whose SET clause
//! rewrites only the addressed leaf paths. The read of the current document
//! and the write of the merged result happen in a single server-side
//! evaluation, so concurrent updates to disjoint paths never lose data.

use chrono::Utc;
use serde_json::{Map, Value as Json};

use crate::ast::SqlValue;
use crate::error::JsonbError;
use crate::quoting::{quote, quote_identifier, quote_json, quote_path, quote_string};
use crate::schema::RecordHandle;

/// Compile a full `UPDATE … SET … WHERE id = …;` statement for one record.
///
/// `payload` maps column names to nested objects of keys to merge. With
/// `touch`, an `updated_at` assignment is appended when the table has that
/// column. All validation happens before any SQL text is produced.
pub fn build_update_query(
    record: &RecordHandle,
    payload: &Json,
    touch: bool,
) -> Result<String, JsonbError> {
    let input = validate_atomic_update(record, payload)?;

    let mut assignments = Vec::with_capacity(input.len() + 1);
    for (name, column_payload) in input {
        let column = record.table.resolve_alias(name);
        let entries = column_payload.as_object().ok_or_else(|| {
            JsonbError::MalformedPayload(format!("value for column {name} must be an object"))
        })?;
        assignments.push(format!(
            "{} = {}",
            quote_identifier(column),
            deep_merge(column, entries)
        ));
    }

    if touch && record.table.has_column("updated_at") {
        assignments.push(format!(
            "{} = {}",
            quote_identifier("updated_at"),
            quote(&SqlValue::Timestamp(Utc::now()))?
        ));
    }

    Ok(format!(
        "UPDATE {} SET {} WHERE id = {};",
        quote_identifier(&record.table.name),
        assignments.join(","),
        quote(&record.id)?
    ))
}

/// Fail-fast preconditions: writable record, object-shaped input, every
/// top-level key an existing, writable jsonb column whose entry map is a
/// non-empty object.
fn validate_atomic_update<'a>(
    record: &RecordHandle,
    payload: &'a Json,
) -> Result<&'a Map<String, Json>, JsonbError> {
    record.ensure_writable()?;

    let input = payload
        .as_object()
        .ok_or_else(|| JsonbError::MalformedPayload("update input must be an object".into()))?;

    for (name, column_payload) in input {
        let column = record.table.resolve_alias(name);
        if record
            .table
            .find_column(column)
            .is_some_and(|c| c.readonly)
        {
            return Err(JsonbError::ReadOnlyAttribute(name.clone()));
        }
        record.table.validate_jsonb_column(column)?;

        let entries = column_payload.as_object().ok_or_else(|| {
            JsonbError::MalformedPayload(format!("value for column {name} must be an object"))
        })?;
        if entries.is_empty() {
            return Err(JsonbError::MalformedPayload(format!(
                "value for column {name} must not be empty"
            )));
        }
    }

    Ok(input)
}

/// Fold every top-level entry of a column payload into one expression.
/// Each entry wraps the previous result, so sibling keys compose into
/// nested `jsonb_set` calls over the column's current value.
fn deep_merge(column: &str, entries: &Map<String, Json>) -> String {
    let mut target = quote_identifier(column);
    for (key, value) in entries {
        let (keys, leaf) = traverse_entry(key, value);
        target = jsonb_set_expr(&target, &keys, leaf);
    }
    target
}

/// Descend through single-key objects, accumulating the path; stop at the
/// first non-object, empty object, or multi-key object. Single-key chains
/// are path sugar, multi-key objects are payload.
fn traverse_entry<'a>(key: &str, value: &'a Json) -> (Vec<String>, &'a Json) {
    let mut keys = vec![key.to_string()];
    let mut leaf = value;
    while let Some(object) = leaf.as_object() {
        if object.len() != 1 {
            break;
        }
        let Some((k, v)) = object.iter().next() else {
            break;
        };
        keys.push(k.clone());
        leaf = v;
    }
    (keys, leaf)
}

/// One `jsonb_set(target, path, value)` wrapper around the running target.
fn jsonb_set_expr(target: &str, keys: &[String], leaf: &Json) -> String {
    let new_value = match leaf.as_object() {
        // Multi-key object: merge over whatever exists at the path.
        Some(object) if object.len() > 1 => concatenation(target, keys, leaf),
        // Everything else is written verbatim, replacing the old value.
        _ => quote_json(leaf),
    };
    format!(
        "jsonb_set({target}::jsonb, {}, {new_value})::jsonb",
        quote_path(keys)
    )
}

/// Merge expression: read the existing value at the path, then `||` the new
/// object so new keys overwrite same-named existing keys at that exact path.
fn concatenation(target: &str, keys: &[String], value: &Json) -> String {
    let path: Vec<String> = keys
        .iter()
        .map(|key| format!("'{}'", quote_string(key)))
        .collect();
    format!("{target}->{} || {}", path.join("->"), quote_json(value))
}
