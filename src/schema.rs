//! Schema catalog and record lifecycle handles.
//!
//! The compiler never talks to a live database: callers describe their
//! tables with [`TableDef`] (loadable from JSON) and wrap a row in a
//! [`RecordHandle`], which decouples the compiler from any particular
//! persistence framework.
//!
//! # Example
//! ```
//! use atomic_jsonb::schema::TableDef;
//!
//! let json = r#"{
//!     "name": "friends",
//!     "columns": [
//!         { "name": "id", "type": "bigint" },
//!         { "name": "name", "type": "varchar" },
//!         { "name": "props", "type": "jsonb" }
//!     ]
//! }"#;
//!
//! let table: TableDef = serde_json::from_str(json).unwrap();
//! assert!(table.validate_jsonb_column("props").is_ok());
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ast::SqlValue;
use crate::error::JsonbError;

/// Similarity threshold for "did you mean" column suggestions.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Column definition with type information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type", alias = "typ")]
    pub typ: String,
    #[serde(default)]
    pub readonly: bool,
}

/// Table definition with columns and attribute aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    /// Caller-facing attribute name -> db column name.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

impl TableDef {
    /// Create a new table definition.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            aliases: HashMap::new(),
        }
    }

    /// Load a table definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builder: add a column.
    pub fn column(mut self, name: &str, typ: &str) -> Self {
        self.columns.push(ColumnDef {
            name: name.to_string(),
            typ: typ.to_string(),
            readonly: false,
        });
        self
    }

    /// Builder: add a jsonb column.
    pub fn jsonb(self, name: &str) -> Self {
        self.column(name, "jsonb")
    }

    /// Builder: add a readonly column.
    pub fn readonly(mut self, name: &str, typ: &str) -> Self {
        self.columns.push(ColumnDef {
            name: name.to_string(),
            typ: typ.to_string(),
            readonly: true,
        });
        self
    }

    /// Builder: register an attribute alias.
    pub fn alias(mut self, attribute: &str, column: &str) -> Self {
        self.aliases
            .insert(attribute.to_string(), column.to_string());
        self
    }

    /// Resolve a caller-facing attribute name to its db column name.
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    pub fn find_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.find_column(name).is_some()
    }

    /// Check that `name` exists and is jsonb-typed.
    pub fn validate_jsonb_column(&self, name: &str) -> Result<&ColumnDef, JsonbError> {
        match self.find_column(name) {
            Some(column) if column.typ == "jsonb" => Ok(column),
            _ => Err(JsonbError::InvalidColumnName {
                table: self.name.clone(),
                column: name.to_string(),
                suggestion: self.closest_column(name),
            }),
        }
    }

    /// Best-scoring existing column name, for error suggestions.
    fn closest_column(&self, name: &str) -> Option<String> {
        self.columns
            .iter()
            .map(|c| (strsim::jaro_winkler(name, &c.name), &c.name))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, candidate)| candidate.clone())
    }
}

/// Where a record sits in its persistence lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Built in memory, never saved.
    New,
    /// Saved and present in the database.
    Persisted,
    /// Deleted from the database.
    Destroyed,
}

/// A handle onto one row: its primary key, lifecycle state, and table
/// catalog. Updates compile against this handle, never a live object.
#[derive(Debug, Clone)]
pub struct RecordHandle {
    pub id: SqlValue,
    pub state: LifecycleState,
    pub table: TableDef,
}

impl RecordHandle {
    /// Handle for a persisted row with the given primary key.
    pub fn persisted(id: impl Into<SqlValue>, table: TableDef) -> Self {
        Self {
            id: id.into(),
            state: LifecycleState::Persisted,
            table,
        }
    }

    /// Handle for an unsaved record (not writable).
    pub fn new_record(table: TableDef) -> Self {
        Self {
            id: SqlValue::Null,
            state: LifecycleState::New,
            table,
        }
    }

    /// Handle for a destroyed record (not writable).
    pub fn destroyed(id: impl Into<SqlValue>, table: TableDef) -> Self {
        Self {
            id: id.into(),
            state: LifecycleState::Destroyed,
            table,
        }
    }

    /// Updates may only target persisted rows.
    pub fn ensure_writable(&self) -> Result<(), JsonbError> {
        match self.state {
            LifecycleState::New => Err(JsonbError::RecordNotWritable("new")),
            LifecycleState::Destroyed => Err(JsonbError::RecordNotWritable("destroyed")),
            LifecycleState::Persisted => Ok(()),
        }
    }
}
