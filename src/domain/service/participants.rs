//! Participant operations.

use crate::domain::foundation::{DomainError, ErrorCode, ParticipantId};
use crate::domain::participant::{NewParticipant, Participant, ParticipantPatch};

use super::CourseService;

impl CourseService {
    /// Registers a new participant.
    ///
    /// Assigns a fresh id, defaults `registration_date` to now and
    /// `is_active` to true, and persists the record.
    pub async fn create_participant(
        &self,
        input: NewParticipant,
    ) -> Result<Participant, DomainError> {
        let participant = Participant::register(input);
        self.participant_store().create(&participant).await?;
        Ok(participant)
    }

    /// Point read by id. Returns `None` when the id does not exist.
    pub async fn get_participant(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, DomainError> {
        Ok(self
            .participant_store()
            .read(id)
            .await?
            .map(|(participant, _)| participant))
    }

    /// All active participants, newest registration first.
    ///
    /// Soft-deleted participants are excluded; there is no access path
    /// for them in this service.
    pub async fn get_all_participants(&self) -> Result<Vec<Participant>, DomainError> {
        self.participant_store().list_active().await
    }

    /// Merges the supplied fields over the existing record and persists
    /// the result.
    ///
    /// # Errors
    ///
    /// - `ParticipantNotFound` if the id does not exist
    pub async fn update_participant(
        &self,
        id: &ParticipantId,
        patch: ParticipantPatch,
    ) -> Result<Participant, DomainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let (mut participant, revision) =
                self.participant_store().read(id).await?.ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::ParticipantNotFound,
                        format!("Participant not found: {}", id),
                    )
                })?;

            participant.merge(patch.clone());

            match self.participant_store().replace(&participant, revision).await {
                Ok(()) => return Ok(participant),
                Err(e) if e.is_retryable() && attempt < Self::max_replace_attempts() => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Soft delete: marks the participant inactive.
    ///
    /// # Errors
    ///
    /// - `ParticipantNotFound` if the id does not exist
    pub async fn delete_participant(&self, id: &ParticipantId) -> Result<(), DomainError> {
        self.update_participant(id, ParticipantPatch::deactivate())
            .await?;
        Ok(())
    }

    /// Hard delete: permanently removes the record. Irreversible.
    ///
    /// # Errors
    ///
    /// - `ParticipantNotFound` if the id does not exist
    pub async fn hard_delete_participant(&self, id: &ParticipantId) -> Result<(), DomainError> {
        self.participant_store().delete(id).await
    }

    /// Display name for a participant, with a fallback when the id no
    /// longer resolves.
    pub async fn participant_full_name(&self, id: &ParticipantId) -> Result<String, DomainError> {
        Ok(match self.get_participant(id).await? {
            Some(participant) => participant.full_name(),
            None => "Unknown Participant".to_string(),
        })
    }
}
