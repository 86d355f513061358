//! Lesson operations.

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, LessonId};
use crate::domain::lesson::{Lesson, LessonPatch, LessonStatus, NewLesson};
use crate::domain::participant::Participant;

use super::CourseService;

/// A lesson paired with the resolved participant record for each
/// embedded enrollment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRoster {
    pub lesson: Lesson,
    pub participants: Vec<Participant>,
}

impl CourseService {
    /// Schedules a new lesson.
    ///
    /// Assigns a fresh id and timestamps and initializes the enrollment
    /// collection empty; caller-supplied values for those are ignored by
    /// construction.
    pub async fn create_lesson(&self, input: NewLesson) -> Result<Lesson, DomainError> {
        let lesson = Lesson::schedule(input);
        self.lesson_store().create(&lesson).await?;
        Ok(lesson)
    }

    /// Point read by id. Returns `None` when the id does not exist.
    pub async fn get_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError> {
        Ok(self.lesson_store().read(id).await?.map(|(lesson, _)| lesson))
    }

    /// All lessons, scheduled date ascending.
    pub async fn get_all_lessons(&self) -> Result<Vec<Lesson>, DomainError> {
        self.lesson_store().list_all().await
    }

    /// Lessons with the given status, scheduled date ascending.
    pub async fn get_lessons_by_status(
        &self,
        status: LessonStatus,
    ) -> Result<Vec<Lesson>, DomainError> {
        self.lesson_store().list_by_status(status).await
    }

    /// Merges the supplied fields over the existing record, refreshes
    /// `updated_at`, and persists the result.
    ///
    /// # Errors
    ///
    /// - `LessonNotFound` if the id does not exist
    pub async fn update_lesson(
        &self,
        id: &LessonId,
        patch: LessonPatch,
    ) -> Result<Lesson, DomainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let (mut lesson, revision) = self.read_lesson_required(id).await?;

            lesson.merge(patch.clone());

            match self.lesson_store().replace(&lesson, revision).await {
                Ok(()) => return Ok(lesson),
                Err(e) if e.is_retryable() && attempt < Self::max_replace_attempts() => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Permanently removes the lesson and its embedded enrollments.
    ///
    /// # Errors
    ///
    /// - `LessonNotFound` if the id does not exist
    /// - `ActiveEnrollments` if any enrollment still occupies a seat and
    ///   `force` is false
    pub async fn delete_lesson(&self, id: &LessonId, force: bool) -> Result<(), DomainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let (lesson, revision) = self.read_lesson_required(id).await?;

            if !force && lesson.has_active_enrollments() {
                return Err(DomainError::new(
                    ErrorCode::ActiveEnrollments,
                    format!(
                        "Lesson has {} active enrollment(s); cancel them first or force the delete",
                        lesson.enrolled_count()
                    ),
                ));
            }

            // The delete is conditional on the revision the guard saw, so
            // an enrollment landing in between forces a re-read.
            match self.lesson_store().delete(id, revision).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_retryable() && attempt < Self::max_replace_attempts() => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// The lesson together with the participant record behind each
    /// embedded enrollment. Participants that no longer resolve are
    /// skipped. Returns `None` when the lesson does not exist.
    pub async fn lesson_roster(&self, id: &LessonId) -> Result<Option<LessonRoster>, DomainError> {
        let Some(lesson) = self.get_lesson(id).await? else {
            return Ok(None);
        };

        let mut participants = Vec::with_capacity(lesson.enrollments.len());
        for enrollment in &lesson.enrollments {
            if let Some(participant) = self.get_participant(&enrollment.participant_id).await? {
                participants.push(participant);
            }
        }

        Ok(Some(LessonRoster {
            lesson,
            participants,
        }))
    }

    pub(crate) async fn read_lesson_required(
        &self,
        id: &LessonId,
    ) -> Result<(Lesson, crate::domain::foundation::Revision), DomainError> {
        self.lesson_store().read(id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::LessonNotFound, format!("Lesson not found: {}", id))
        })
    }
}
