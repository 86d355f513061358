//! Lesson store port.
//!
//! Contract for the lesson container of the document store. The lesson
//! document embeds its enrollments, so this port is the only
//! persistence path for enrollment state as well.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LessonId, Revision};
use crate::domain::lesson::{Lesson, LessonStatus};

/// Store port for the lesson container.
#[async_trait]
pub trait LessonStore: Send + Sync {
    /// Insert a new lesson document.
    ///
    /// # Errors
    ///
    /// - `DuplicateDocument` if the id already exists
    /// - `StoreError` on infrastructure failure
    async fn create(&self, lesson: &Lesson) -> Result<(), DomainError>;

    /// Point read by id, returning the document and its current revision.
    ///
    /// Returns `None` when the id does not exist.
    async fn read(&self, id: &LessonId) -> Result<Option<(Lesson, Revision)>, DomainError>;

    /// Replace the full document, conditional on the revision the caller
    /// read.
    ///
    /// # Errors
    ///
    /// - `LessonNotFound` if the id does not exist
    /// - `RevisionConflict` if another writer got there first
    /// - `StoreError` on infrastructure failure
    async fn replace(&self, lesson: &Lesson, expected: Revision) -> Result<(), DomainError>;

    /// Permanently remove the document, embedded enrollments included,
    /// conditional on the revision the caller read.
    ///
    /// The condition keeps guard checks made against the read copy valid
    /// at the moment of removal.
    ///
    /// # Errors
    ///
    /// - `LessonNotFound` if the id does not exist
    /// - `RevisionConflict` if another writer got there first
    async fn delete(&self, id: &LessonId, expected: Revision) -> Result<(), DomainError>;

    /// All lessons, ordered by scheduled date ascending.
    async fn list_all(&self) -> Result<Vec<Lesson>, DomainError>;

    /// Lessons with the given status, same ordering as `list_all`.
    async fn list_by_status(&self, status: LessonStatus) -> Result<Vec<Lesson>, DomainError>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> Result<(), DomainError>;
}
