/// Document and error types for the document store
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A stored JSON document with its store-assigned metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

/// Errors raised by the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No store connection was established at startup
    #[error("Database not connected")]
    Unavailable,

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A previous holder of the connection lock panicked
    #[error("Database connection lock poisoned")]
    LockPoisoned,

    /// Filter keys must be plain identifiers
    #[error("Invalid filter key: {key}")]
    InvalidFilterKey { key: String },

    /// Documents must be JSON objects
    #[error("Expected a JSON object, got: {kind}")]
    NotADocument { kind: &'static str },
}

/// Converts a JSON value into a document body.
pub fn into_object(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(StoreError::NotADocument { kind: "null" }),
        Value::Bool(_) => Err(StoreError::NotADocument { kind: "bool" }),
        Value::Number(_) => Err(StoreError::NotADocument { kind: "number" }),
        Value::String(_) => Err(StoreError::NotADocument { kind: "string" }),
        Value::Array(_) => Err(StoreError::NotADocument { kind: "array" }),
    }
}
