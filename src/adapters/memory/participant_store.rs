//! In-Memory Participant Store Adapter
//!
//! Keeps participant documents in a process-local map.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ParticipantId, Revision};
use crate::domain::participant::Participant;
use crate::ports::ParticipantStore;

/// In-memory implementation of [`ParticipantStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryParticipantStore {
    documents: Arc<RwLock<HashMap<ParticipantId, (Participant, Revision)>>>,
}

impl InMemoryParticipantStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents, active or not (useful for tests).
    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl ParticipantStore for InMemoryParticipantStore {
    async fn create(&self, participant: &Participant) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(&participant.id) {
            return Err(DomainError::new(
                ErrorCode::DuplicateDocument,
                format!("Participant document already exists: {}", participant.id),
            ));
        }
        documents.insert(participant.id, (participant.clone(), Revision::initial()));
        Ok(())
    }

    async fn read(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<(Participant, Revision)>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.get(id).cloned())
    }

    async fn replace(
        &self,
        participant: &Participant,
        expected: Revision,
    ) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(&participant.id) {
            None => Err(DomainError::new(
                ErrorCode::ParticipantNotFound,
                format!("Participant not found: {}", participant.id),
            )),
            Some((_, revision)) if *revision != expected => Err(DomainError::new(
                ErrorCode::RevisionConflict,
                format!(
                    "Participant {} was modified concurrently (expected revision {}, found {})",
                    participant.id, expected, revision
                ),
            )),
            Some(slot) => {
                *slot = (participant.clone(), expected.next());
                Ok(())
            }
        }
    }

    async fn delete(&self, id: &ParticipantId) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        documents.remove(id).map(|_| ()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ParticipantNotFound,
                format!("Participant not found: {}", id),
            )
        })
    }

    async fn list_active(&self) -> Result<Vec<Participant>, DomainError> {
        let documents = self.documents.read().await;
        let mut active: Vec<Participant> = documents
            .values()
            .filter(|(p, _)| p.is_active)
            .map(|(p, _)| p.clone())
            .collect();
        active.sort_by(|a, b| b.registration_date.cmp(&a.registration_date));
        Ok(active)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::participant::NewParticipant;

    fn participant(name: &str, registered_days_ago: i64) -> Participant {
        Participant::register(NewParticipant {
            first_name: name.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            registration_date: Some(Timestamp::now().minus_days(registered_days_ago)),
            ..NewParticipant::default()
        })
    }

    #[tokio::test]
    async fn create_then_read_returns_document_at_initial_revision() {
        let store = InMemoryParticipantStore::new();
        let p = participant("Anna", 0);
        store.create(&p).await.unwrap();

        let (found, revision) = store.read(&p.id).await.unwrap().unwrap();
        assert_eq!(found, p);
        assert_eq!(revision, Revision::initial());
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let store = InMemoryParticipantStore::new();
        let p = participant("Anna", 0);
        store.create(&p).await.unwrap();

        let err = store.create(&p).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateDocument);
    }

    #[tokio::test]
    async fn replace_bumps_revision() {
        let store = InMemoryParticipantStore::new();
        let mut p = participant("Anna", 0);
        store.create(&p).await.unwrap();

        p.phone = Some("+45 12 34 56 78".to_string());
        store.replace(&p, Revision::initial()).await.unwrap();

        let (found, revision) = store.read(&p.id).await.unwrap().unwrap();
        assert_eq!(found.phone.as_deref(), Some("+45 12 34 56 78"));
        assert_eq!(revision, Revision::initial().next());
    }

    #[tokio::test]
    async fn replace_with_stale_revision_conflicts() {
        let store = InMemoryParticipantStore::new();
        let p = participant("Anna", 0);
        store.create(&p).await.unwrap();
        store.replace(&p, Revision::initial()).await.unwrap();

        let err = store.replace(&p, Revision::initial()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RevisionConflict);
    }

    #[tokio::test]
    async fn replace_missing_document_is_not_found() {
        let store = InMemoryParticipantStore::new();
        let p = participant("Anna", 0);
        let err = store.replace(&p, Revision::initial()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ParticipantNotFound);
    }

    #[tokio::test]
    async fn delete_removes_document() {
        let store = InMemoryParticipantStore::new();
        let p = participant("Anna", 0);
        store.create(&p).await.unwrap();

        store.delete(&p.id).await.unwrap();
        assert!(store.read(&p.id).await.unwrap().is_none());

        let err = store.delete(&p.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ParticipantNotFound);
    }

    #[tokio::test]
    async fn list_active_filters_and_orders_newest_first() {
        let store = InMemoryParticipantStore::new();
        let older = participant("Older", 10);
        let newer = participant("Newer", 1);
        let mut inactive = participant("Gone", 0);
        inactive.is_active = false;

        store.create(&older).await.unwrap();
        store.create(&newer).await.unwrap();
        store.create(&inactive).await.unwrap();

        let active = store.list_active().await.unwrap();
        let names: Vec<&str> = active.iter().map(|p| p.first_name.as_str()).collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }
}
