//! In-Memory Lesson Store Adapter
//!
//! Keeps lesson documents (with their embedded enrollments) in a
//! process-local map. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, LessonId, Revision};
use crate::domain::lesson::{Lesson, LessonStatus};
use crate::ports::LessonStore;

/// In-memory implementation of [`LessonStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryLessonStore {
    documents: Arc<RwLock<HashMap<LessonId, (Lesson, Revision)>>>,
}

impl InMemoryLessonStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents (useful for tests).
    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl LessonStore for InMemoryLessonStore {
    async fn create(&self, lesson: &Lesson) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(&lesson.id) {
            return Err(DomainError::new(
                ErrorCode::DuplicateDocument,
                format!("Lesson document already exists: {}", lesson.id),
            ));
        }
        documents.insert(lesson.id, (lesson.clone(), Revision::initial()));
        Ok(())
    }

    async fn read(&self, id: &LessonId) -> Result<Option<(Lesson, Revision)>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.get(id).cloned())
    }

    async fn replace(&self, lesson: &Lesson, expected: Revision) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(&lesson.id) {
            None => Err(DomainError::new(
                ErrorCode::LessonNotFound,
                format!("Lesson not found: {}", lesson.id),
            )),
            Some((_, revision)) if *revision != expected => Err(DomainError::new(
                ErrorCode::RevisionConflict,
                format!(
                    "Lesson {} was modified concurrently (expected revision {}, found {})",
                    lesson.id, expected, revision
                ),
            )),
            Some(slot) => {
                *slot = (lesson.clone(), expected.next());
                Ok(())
            }
        }
    }

    async fn delete(&self, id: &LessonId, expected: Revision) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        match documents.get(id) {
            None => Err(DomainError::new(
                ErrorCode::LessonNotFound,
                format!("Lesson not found: {}", id),
            )),
            Some((_, revision)) if *revision != expected => Err(DomainError::new(
                ErrorCode::RevisionConflict,
                format!(
                    "Lesson {} was modified concurrently (expected revision {}, found {})",
                    id, expected, revision
                ),
            )),
            Some(_) => {
                documents.remove(id);
                Ok(())
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<Lesson>, DomainError> {
        let documents = self.documents.read().await;
        let mut lessons: Vec<Lesson> = documents.values().map(|(l, _)| l.clone()).collect();
        lessons.sort_by(|a, b| a.date_time.cmp(&b.date_time));
        Ok(lessons)
    }

    async fn list_by_status(&self, status: LessonStatus) -> Result<Vec<Lesson>, DomainError> {
        let mut lessons = self.list_all().await?;
        lessons.retain(|l| l.status == status);
        Ok(lessons)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
