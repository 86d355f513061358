//! PostgreSQL implementation of ParticipantStore.
//!
//! Participant documents are stored as JSONB rows keyed by id, with a
//! revision column for conditional replaces.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, ParticipantId, Revision};
use crate::domain::participant::Participant;
use crate::ports::ParticipantStore;

use super::{decode_doc, encode_doc, map_insert_error, map_store_error, revision_from_row};

/// PostgreSQL implementation of [`ParticipantStore`].
#[derive(Clone)]
pub struct PostgresParticipantStore {
    pool: PgPool,
}

impl PostgresParticipantStore {
    /// Creates a new store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantStore for PostgresParticipantStore {
    async fn create(&self, participant: &Participant) -> Result<(), DomainError> {
        let doc = encode_doc(participant)?;

        sqlx::query("INSERT INTO participants (id, revision, doc) VALUES ($1, $2, $3)")
            .bind(participant.id.as_uuid())
            .bind(Revision::initial().value() as i64)
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, "participant", &participant.id.to_string()))?;

        Ok(())
    }

    async fn read(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<(Participant, Revision)>, DomainError> {
        let row = sqlx::query("SELECT revision, doc FROM participants WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_store_error(e, "read participant"))?;

        row.map(|row| {
            let doc: serde_json::Value = row
                .try_get("doc")
                .map_err(|e| map_store_error(e, "decode participant row"))?;
            Ok((decode_doc(doc)?, revision_from_row(&row)?))
        })
        .transpose()
    }

    async fn replace(
        &self,
        participant: &Participant,
        expected: Revision,
    ) -> Result<(), DomainError> {
        let doc = encode_doc(participant)?;

        let result = sqlx::query(
            "UPDATE participants SET doc = $2, revision = revision + 1 \
             WHERE id = $1 AND revision = $3",
        )
        .bind(participant.id.as_uuid())
        .bind(doc)
        .bind(expected.value() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| map_store_error(e, "replace participant"))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Distinguish a vanished document from a concurrent writer.
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM participants WHERE id = $1)")
                .bind(participant.id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_store_error(e, "check participant existence"))?;

        if exists {
            Err(DomainError::new(
                ErrorCode::RevisionConflict,
                format!(
                    "Participant {} was modified concurrently (expected revision {})",
                    participant.id, expected
                ),
            ))
        } else {
            Err(DomainError::new(
                ErrorCode::ParticipantNotFound,
                format!("Participant not found: {}", participant.id),
            ))
        }
    }

    async fn delete(&self, id: &ParticipantId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_store_error(e, "delete participant"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ParticipantNotFound,
                format!("Participant not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<Participant>, DomainError> {
        let rows = sqlx::query(
            "SELECT doc FROM participants \
             WHERE (doc->>'isActive')::boolean = true \
             ORDER BY rfc3339_ts(doc->>'registrationDate') DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_store_error(e, "list active participants"))?;

        rows.into_iter()
            .map(|row| {
                let doc: serde_json::Value = row
                    .try_get("doc")
                    .map_err(|e| map_store_error(e, "decode participant row"))?;
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
