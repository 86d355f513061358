//! PostgreSQL implementation of LessonStore.
//!
//! Lesson documents, embedded enrollments included, are stored as JSONB
//! rows keyed by id, with a revision column for conditional replaces.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, LessonId, Revision};
use crate::domain::lesson::{Lesson, LessonStatus};
use crate::ports::LessonStore;

use super::{decode_doc, encode_doc, map_insert_error, map_store_error, revision_from_row};

/// PostgreSQL implementation of [`LessonStore`].
#[derive(Clone)]
pub struct PostgresLessonStore {
    pool: PgPool,
}

impl PostgresLessonStore {
    /// Creates a new store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonStore for PostgresLessonStore {
    async fn create(&self, lesson: &Lesson) -> Result<(), DomainError> {
        let doc = encode_doc(lesson)?;

        sqlx::query("INSERT INTO lessons (id, revision, doc) VALUES ($1, $2, $3)")
            .bind(lesson.id.as_uuid())
            .bind(Revision::initial().value() as i64)
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, "lesson", &lesson.id.to_string()))?;

        Ok(())
    }

    async fn read(&self, id: &LessonId) -> Result<Option<(Lesson, Revision)>, DomainError> {
        let row = sqlx::query("SELECT revision, doc FROM lessons WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_store_error(e, "read lesson"))?;

        row.map(|row| {
            let doc: serde_json::Value = row
                .try_get("doc")
                .map_err(|e| map_store_error(e, "decode lesson row"))?;
            Ok((decode_doc(doc)?, revision_from_row(&row)?))
        })
        .transpose()
    }

    async fn replace(&self, lesson: &Lesson, expected: Revision) -> Result<(), DomainError> {
        let doc = encode_doc(lesson)?;

        let result = sqlx::query(
            "UPDATE lessons SET doc = $2, revision = revision + 1 \
             WHERE id = $1 AND revision = $3",
        )
        .bind(lesson.id.as_uuid())
        .bind(doc)
        .bind(expected.value() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| map_store_error(e, "replace lesson"))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Distinguish a vanished document from a concurrent writer.
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM lessons WHERE id = $1)")
            .bind(lesson.id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_store_error(e, "check lesson existence"))?;

        if exists {
            Err(DomainError::new(
                ErrorCode::RevisionConflict,
                format!(
                    "Lesson {} was modified concurrently (expected revision {})",
                    lesson.id, expected
                ),
            ))
        } else {
            Err(DomainError::new(
                ErrorCode::LessonNotFound,
                format!("Lesson not found: {}", lesson.id),
            ))
        }
    }

    async fn delete(&self, id: &LessonId, expected: Revision) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1 AND revision = $2")
            .bind(id.as_uuid())
            .bind(expected.value() as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| map_store_error(e, "delete lesson"))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Distinguish a vanished document from a concurrent writer.
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM lessons WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_store_error(e, "check lesson existence"))?;

        if exists {
            Err(DomainError::new(
                ErrorCode::RevisionConflict,
                format!(
                    "Lesson {} was modified concurrently (expected revision {})",
                    id, expected
                ),
            ))
        } else {
            Err(DomainError::new(
                ErrorCode::LessonNotFound,
                format!("Lesson not found: {}", id),
            ))
        }
    }

    async fn list_all(&self) -> Result<Vec<Lesson>, DomainError> {
        let rows = sqlx::query("SELECT doc FROM lessons ORDER BY rfc3339_ts(doc->>'dateTime') ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_store_error(e, "list lessons"))?;

        rows.into_iter()
            .map(|row| {
                let doc: serde_json::Value = row
                    .try_get("doc")
                    .map_err(|e| map_store_error(e, "decode lesson row"))?;
                decode_doc(doc)
            })
            .collect()
    }

    async fn list_by_status(&self, status: LessonStatus) -> Result<Vec<Lesson>, DomainError> {
        let rows = sqlx::query(
            "SELECT doc FROM lessons WHERE doc->>'status' = $1 \
             ORDER BY rfc3339_ts(doc->>'dateTime') ASC",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_store_error(e, "list lessons by status"))?;

        rows.into_iter()
            .map(|row| {
                let doc: serde_json::Value = row
                    .try_get("doc")
                    .map_err(|e| map_store_error(e, "decode lesson row"))?;
                decode_doc(doc)
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| map_store_error(e, "ping"))?;
        Ok(())
    }
}
