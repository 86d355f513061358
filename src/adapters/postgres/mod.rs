//! PostgreSQL store adapters.
//!
//! Each logical container of the document store maps to one table of
//! `(id UUID, revision BIGINT, doc JSONB)` rows. Conditional replaces
//! compare the revision the caller read, giving the optimistic
//! concurrency control the port contract requires.

mod lesson_store;
mod participant_store;

pub use lesson_store::PostgresLessonStore;
pub use participant_store::PostgresParticipantStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, ErrorCode, Revision};

fn encode_doc<T: Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::store(format!("Failed to encode document: {}", e)))
}

fn decode_doc<T: DeserializeOwned>(doc: serde_json::Value) -> Result<T, DomainError> {
    serde_json::from_value(doc)
        .map_err(|e| DomainError::store(format!("Failed to decode document: {}", e)))
}

fn revision_from_row(row: &PgRow) -> Result<Revision, DomainError> {
    let revision: i64 = row
        .try_get("revision")
        .map_err(|e| DomainError::store(format!("Failed to read revision column: {}", e)))?;
    Ok(Revision::from_value(revision as u64))
}

fn map_store_error(error: sqlx::Error, context: &str) -> DomainError {
    DomainError::store(format!("Store operation failed ({}): {}", context, error))
}

fn map_insert_error(error: sqlx::Error, kind: &str, id: &str) -> DomainError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() {
            return DomainError::new(
                ErrorCode::DuplicateDocument,
                format!("{} document already exists: {}", kind, id),
            );
        }
    }
    map_store_error(error, "insert")
}
