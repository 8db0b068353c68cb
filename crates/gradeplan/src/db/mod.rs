/// Document store for user profiles and semester records
///
/// Documents are JSON objects grouped into named collections and kept in a
/// single SQLite table. Filters match top-level fields and are evaluated by
/// SQLite's JSON functions.
mod records;
mod types;

pub use records::*;
pub use types::{StoreError, StoredDocument};

use types::into_object;

use chrono::{DateTime, Utc};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use serde_json::{Map, Value};
use std::fmt::Write;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

const SCHEMA_SQL: &str = include_str!("../../sql/init_documents.sql");

pub struct DocumentStore {
    db: Mutex<Connection>,
    name: String,
}

impl DocumentStore {
    /// Opens (or creates) the store at `db_path` and initializes the schema.
    pub fn open(db_path: &str, name: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(db_path)?;
        Self::with_connection(conn, name)
    }

    /// Opens a store that lives only as long as this value.
    pub fn open_in_memory(name: &str) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, name)
    }

    fn with_connection(conn: Connection, name: &str) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.db.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Inserts a document with fresh id and timestamps.
    pub fn create(&self, collection: &str, data: Value) -> Result<StoredDocument, StoreError> {
        let data = into_object(data)?;
        let db = self.conn()?;
        insert_document(&db, collection, data)
    }

    /// Returns documents whose top-level fields equal every field of
    /// `filter`, oldest first, at most `limit` of them.
    pub fn find(
        &self,
        collection: &str,
        filter: &Value,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let clause = FilterClause::new(collection, &filter_object(filter)?)?;
        let db = self.conn()?;
        select_documents(&db, clause, Some(limit))
    }

    /// Like `find`, without a limit.
    pub fn find_all(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let clause = FilterClause::new(collection, &filter_object(filter)?)?;
        let db = self.conn()?;
        select_documents(&db, clause, None)
    }

    pub fn find_one(
        &self,
        collection: &str,
        filter: &Value,
    ) -> Result<Option<StoredDocument>, StoreError> {
        Ok(self.find(collection, filter, 1)?.into_iter().next())
    }

    /// Sets `data` fields on the first document matching `filter`, or
    /// inserts `filter` merged with `data` when nothing matches.
    pub fn upsert(
        &self,
        collection: &str,
        filter: &Value,
        data: Value,
    ) -> Result<StoredDocument, StoreError> {
        let filter = filter_object(filter)?;
        let data = into_object(data)?;
        let clause = FilterClause::new(collection, &filter)?;
        let db = self.conn()?;

        let existing = select_documents(&db, clause, Some(1))?.into_iter().next();

        match existing {
            Some(mut doc) => {
                doc.data.extend(data);
                doc.updated_at = Utc::now();
                db.execute(
                    "UPDATE documents SET body = ?1, updated_at = ?2 WHERE id = ?3",
                    (serde_json::to_string(&doc.data)?, doc.updated_at, &doc.id),
                )?;
                debug!("Updated document {} in {}", doc.id, collection);
                Ok(doc)
            }
            None => {
                let mut body = filter;
                body.extend(data);
                insert_document(&db, collection, body)
            }
        }
    }

    /// Removes every document matching `filter` and returns how many went.
    pub fn delete(&self, collection: &str, filter: &Value) -> Result<usize, StoreError> {
        let clause = FilterClause::new(collection, &filter_object(filter)?)?;
        let db = self.conn()?;
        delete_documents(&db, clause)
    }

    /// Atomically swaps the documents matching `filter` for `documents`,
    /// each stored as `filter` merged with its own fields.
    pub fn replace(
        &self,
        collection: &str,
        filter: &Value,
        documents: Vec<Value>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let filter = filter_object(filter)?;
        let bodies = documents
            .into_iter()
            .map(|data| -> Result<Map<String, Value>, StoreError> {
                let mut body = filter.clone();
                body.extend(into_object(data)?);
                Ok(body)
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        let clause = FilterClause::new(collection, &filter)?;

        let mut db = self.conn()?;
        let tx = db.transaction()?;
        let removed = delete_documents(&tx, clause)?;
        let stored = bodies
            .into_iter()
            .map(|body| insert_document(&tx, collection, body))
            .collect::<Result<Vec<_>, StoreError>>()?;
        tx.commit()?;

        debug!(
            "Replaced {} documents in {} with {}",
            removed,
            collection,
            stored.len()
        );
        Ok(stored)
    }

    /// Lists the collections that hold at least one document.
    pub fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let db = self.conn()?;
        let mut stmt = db.prepare("SELECT DISTINCT collection FROM documents ORDER BY collection")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }
}

/// `WHERE` clause selecting one collection's documents by top-level field
/// equality, with its positional parameters.
struct FilterClause {
    sql: String,
    params: Vec<SqlValue>,
}

impl FilterClause {
    fn new(collection: &str, filter: &Map<String, Value>) -> Result<Self, StoreError> {
        let mut sql = String::from("WHERE collection = ?1");
        let mut params = vec![SqlValue::Text(collection.to_string())];

        for (key, value) in filter {
            params.push(SqlValue::Text(json_path(key)?));
            let path = params.len();
            params.push(SqlValue::Text(serde_json::to_string(value)?));
            let expected = params.len();

            // json_type tells 1 from 1.0 and "1", and null from a missing key
            let _ = write!(sql, " AND json_type(body, ?{path}) = json_type(?{expected})");
            if !value.is_null() {
                let _ = write!(
                    sql,
                    " AND json_extract(body, ?{path}) = json_extract(?{expected}, '$')"
                );
            }
        }

        Ok(Self { sql, params })
    }
}

/// Filter keys are plain identifiers, so they can be spliced into a path.
fn json_path(key: &str) -> Result<String, StoreError> {
    let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(StoreError::InvalidFilterKey {
            key: key.to_string(),
        });
    }
    Ok(format!("$.{key}"))
}

type DocumentRow = (String, String, DateTime<Utc>, DateTime<Utc>);

fn decode_row(row: DocumentRow) -> Result<StoredDocument, StoreError> {
    let (id, body, created_at, updated_at) = row;
    let value: Value = serde_json::from_str(&body)?;
    Ok(StoredDocument {
        id,
        created_at,
        updated_at,
        data: into_object(value)?,
    })
}

fn filter_object(filter: &Value) -> Result<Map<String, Value>, StoreError> {
    into_object(filter.clone())
}

fn insert_document(
    db: &Connection,
    collection: &str,
    data: Map<String, Value>,
) -> Result<StoredDocument, StoreError> {
    let now = Utc::now();
    let doc = StoredDocument {
        id: Uuid::new_v4().to_string(),
        created_at: now,
        updated_at: now,
        data,
    };

    db.execute(
        "INSERT INTO documents (id, collection, body, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            &doc.id,
            collection,
            serde_json::to_string(&doc.data)?,
            doc.created_at,
            doc.updated_at,
        ),
    )?;

    debug!("Inserted document {} into {}", doc.id, collection);
    Ok(doc)
}

fn select_documents(
    db: &Connection,
    clause: FilterClause,
    limit: Option<usize>,
) -> Result<Vec<StoredDocument>, StoreError> {
    let FilterClause { mut sql, mut params } = clause;
    sql.insert_str(0, "SELECT id, body, created_at, updated_at FROM documents ");
    sql.push_str(" ORDER BY seq");
    if let Some(limit) = limit {
        params.push(SqlValue::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
        let _ = write!(sql, " LIMIT ?{}", params.len());
    }

    let mut stmt = db.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, DateTime<Utc>>(2)?,
                row.get::<_, DateTime<Utc>>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<DocumentRow>>>()?;

    rows.into_iter().map(decode_row).collect()
}

fn delete_documents(db: &Connection, clause: FilterClause) -> Result<usize, StoreError> {
    let sql = format!("DELETE FROM documents {}", clause.sql);
    Ok(db.execute(&sql, params_from_iter(clause.params.iter()))?)
}
