//! Participant store port.
//!
//! Contract for the participant container of the document store: point
//! read/replace/delete plus a secondary query for the active roster.
//! Implementations attach a [`Revision`] to every document so
//! read-modify-write cycles can be replayed instead of losing updates.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ParticipantId, Revision};
use crate::domain::participant::Participant;

/// Store port for the participant container.
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// Insert a new participant document.
    ///
    /// # Errors
    ///
    /// - `DuplicateDocument` if the id already exists
    /// - `StoreError` on infrastructure failure
    async fn create(&self, participant: &Participant) -> Result<(), DomainError>;

    /// Point read by id, returning the document and its current revision.
    ///
    /// Returns `None` when the id does not exist.
    async fn read(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<(Participant, Revision)>, DomainError>;

    /// Replace the full document, conditional on the revision the caller
    /// read.
    ///
    /// # Errors
    ///
    /// - `ParticipantNotFound` if the id does not exist
    /// - `RevisionConflict` if another writer got there first
    /// - `StoreError` on infrastructure failure
    async fn replace(
        &self,
        participant: &Participant,
        expected: Revision,
    ) -> Result<(), DomainError>;

    /// Permanently remove the document.
    ///
    /// # Errors
    ///
    /// - `ParticipantNotFound` if the id does not exist
    async fn delete(&self, id: &ParticipantId) -> Result<(), DomainError>;

    /// All participants with `is_active = true`, ordered by registration
    /// date descending.
    async fn list_active(&self) -> Result<Vec<Participant>, DomainError>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> Result<(), DomainError>;
}
