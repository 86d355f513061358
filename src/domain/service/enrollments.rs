//! Enrollment operations.
//!
//! Every mutation here is a read-modify-write cycle on the owning
//! lesson document, replayed on revision conflict so two concurrent
//! enrollments cannot both pass the capacity check against a stale
//! read.

use serde::Serialize;

use crate::domain::enrollment::{Enrollment, EnrollmentStatus, PaymentStatus};
use crate::domain::foundation::{DomainError, ErrorCode, LessonId, ParticipantId};
use crate::domain::lesson::Lesson;

use super::CourseService;

/// An enrollment paired with its owning lesson, as returned by the
/// participant-side query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantEnrollment {
    pub lesson: Lesson,
    pub enrollment: Enrollment,
}

impl CourseService {
    /// Enrolls a participant into a lesson.
    ///
    /// # Errors
    ///
    /// - `LessonNotFound` / `ParticipantNotFound` if either id does not
    ///   resolve
    /// - `ValidationFailed` if the participant is inactive and the
    ///   policy disallows enrolling them
    /// - `AlreadyEnrolled` if an enrollment for the pair already exists
    /// - `CapacityExceeded` if the lesson is full
    pub async fn enroll_participant(
        &self,
        lesson_id: &LessonId,
        participant_id: &ParticipantId,
        notes: Option<String>,
    ) -> Result<Enrollment, DomainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let (mut lesson, revision) = self.read_lesson_required(lesson_id).await?;

            let participant = self
                .get_participant(participant_id)
                .await?
                .ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::ParticipantNotFound,
                        format!("Participant not found: {}", participant_id),
                    )
                })?;

            if !participant.is_active && !self.policy().allow_inactive_enrollment {
                return Err(DomainError::validation(
                    "participantId",
                    "Participant is inactive and cannot be enrolled",
                ));
            }

            if lesson.find_enrollment(participant_id).is_some() {
                return Err(DomainError::new(
                    ErrorCode::AlreadyEnrolled,
                    "Participant already enrolled in this lesson",
                ));
            }

            if !lesson.has_capacity() {
                return Err(DomainError::new(
                    ErrorCode::CapacityExceeded,
                    "Lesson is at maximum capacity",
                ));
            }

            let enrollment = Enrollment::new(*lesson_id, *participant_id, notes.clone());
            lesson.enrollments.push(enrollment.clone());
            lesson.touch();

            match self.lesson_store().replace(&lesson, revision).await {
                Ok(()) => return Ok(enrollment),
                Err(e) if e.is_retryable() && attempt < Self::max_replace_attempts() => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Removes any enrollment for the pair from the lesson.
    ///
    /// Idempotent: succeeds even when no matching enrollment exists.
    ///
    /// # Errors
    ///
    /// - `LessonNotFound` if the lesson id does not resolve
    pub async fn unenroll_participant(
        &self,
        lesson_id: &LessonId,
        participant_id: &ParticipantId,
    ) -> Result<(), DomainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let (mut lesson, revision) = self.read_lesson_required(lesson_id).await?;

            let before = lesson.enrollments.len();
            lesson
                .enrollments
                .retain(|e| &e.participant_id != participant_id);
            if lesson.enrollments.len() == before {
                // Nothing to remove; no write needed.
                return Ok(());
            }
            lesson.touch();

            match self.lesson_store().replace(&lesson, revision).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_retryable() && attempt < Self::max_replace_attempts() => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Embedded enrollments of a lesson. Empty when the lesson does not
    /// exist or has none.
    pub async fn get_enrollments_for_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Vec<Enrollment>, DomainError> {
        Ok(self
            .get_lesson(lesson_id)
            .await?
            .map(|lesson| lesson.enrollments)
            .unwrap_or_default())
    }

    /// Every enrollment of a participant, paired with the owning lesson.
    ///
    /// Full scan over all lessons; there is no secondary index on
    /// participant id.
    pub async fn get_enrollments_for_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Vec<ParticipantEnrollment>, DomainError> {
        let lessons = self.get_all_lessons().await?;
        let mut found = Vec::new();

        for lesson in lessons {
            let matching: Vec<Enrollment> = lesson
                .enrollments
                .iter()
                .filter(|e| &e.participant_id == participant_id)
                .cloned()
                .collect();
            for enrollment in matching {
                found.push(ParticipantEnrollment {
                    lesson: lesson.clone(),
                    enrollment,
                });
            }
        }

        Ok(found)
    }

    /// Sets the status of the embedded enrollment for the pair.
    ///
    /// # Errors
    ///
    /// - `LessonNotFound` / `EnrollmentNotFound`
    pub async fn update_enrollment_status(
        &self,
        lesson_id: &LessonId,
        participant_id: &ParticipantId,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, DomainError> {
        self.mutate_enrollment(lesson_id, participant_id, |e| e.status = status)
            .await
    }

    /// Sets the payment status of the embedded enrollment for the pair.
    ///
    /// # Errors
    ///
    /// - `LessonNotFound` / `EnrollmentNotFound`
    pub async fn update_enrollment_payment_status(
        &self,
        lesson_id: &LessonId,
        participant_id: &ParticipantId,
        payment_status: PaymentStatus,
    ) -> Result<Enrollment, DomainError> {
        self.mutate_enrollment(lesson_id, participant_id, |e| {
            e.payment_status = payment_status
        })
        .await
    }

    /// Shared read-modify-write cycle for single-field enrollment
    /// mutations.
    async fn mutate_enrollment(
        &self,
        lesson_id: &LessonId,
        participant_id: &ParticipantId,
        mutate: impl Fn(&mut Enrollment),
    ) -> Result<Enrollment, DomainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let (mut lesson, revision) = self.read_lesson_required(lesson_id).await?;

            let enrollment = lesson.find_enrollment_mut(participant_id).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::EnrollmentNotFound,
                    format!(
                        "No enrollment for participant {} in lesson {}",
                        participant_id, lesson_id
                    ),
                )
            })?;
            mutate(enrollment);
            let updated = enrollment.clone();
            lesson.touch();

            match self.lesson_store().replace(&lesson, revision).await {
                Ok(()) => return Ok(updated),
                Err(e) if e.is_retryable() && attempt < Self::max_replace_attempts() => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::{InMemoryLessonStore, InMemoryParticipantStore};
    use crate::domain::foundation::Timestamp;
    use crate::domain::lesson::{NewLesson, SkillLevel};
    use crate::domain::participant::NewParticipant;
    use crate::domain::service::ServicePolicy;

    fn service() -> CourseService {
        CourseService::new(
            Arc::new(InMemoryParticipantStore::new()),
            Arc::new(InMemoryLessonStore::new()),
        )
    }

    fn scheduling(max_participants: u32) -> NewLesson {
        NewLesson {
            title: "Rye Bread".to_string(),
            description: "Dense and dark".to_string(),
            skill_level: SkillLevel::Intermediate,
            duration: 150,
            max_participants,
            price: 60.0,
            date_time: Timestamp::now().add_days(14),
            location: None,
            instructor: None,
            ingredients: vec![],
            equipment: vec![],
            techniques: vec![],
            status: None,
        }
    }

    async fn new_participant(svc: &CourseService, first: &str) -> ParticipantId {
        svc.create_participant(NewParticipant {
            first_name: first.to_string(),
            last_name: "Baker".to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            ..NewParticipant::default()
        })
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn enroll_creates_pending_enrollment_and_touches_lesson() {
        let svc = service();
        let lesson = svc.create_lesson(scheduling(5)).await.unwrap();
        let pid = new_participant(&svc, "Nora").await;

        std::thread::sleep(std::time::Duration::from_millis(10));
        let enrollment = svc
            .enroll_participant(&lesson.id, &pid, Some("gluten free".to_string()))
            .await
            .unwrap();

        assert_eq!(enrollment.status, EnrollmentStatus::Enrolled);
        assert_eq!(enrollment.payment_status, PaymentStatus::Pending);
        assert_eq!(enrollment.notes.as_deref(), Some("gluten free"));

        let stored = svc.get_lesson(&lesson.id).await.unwrap().unwrap();
        assert_eq!(stored.enrollments.len(), 1);
        assert!(stored.updated_at.is_after(&lesson.updated_at));
    }

    #[tokio::test]
    async fn enroll_twice_for_same_pair_conflicts() {
        let svc = service();
        let lesson = svc.create_lesson(scheduling(5)).await.unwrap();
        let pid = new_participant(&svc, "Nora").await;

        svc.enroll_participant(&lesson.id, &pid, None).await.unwrap();
        let err = svc
            .enroll_participant(&lesson.id, &pid, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyEnrolled);
    }

    #[tokio::test]
    async fn enroll_beyond_capacity_fails() {
        let svc = service();
        let lesson = svc.create_lesson(scheduling(1)).await.unwrap();
        let first = new_participant(&svc, "Nora").await;
        let second = new_participant(&svc, "Else").await;

        svc.enroll_participant(&lesson.id, &first, None)
            .await
            .unwrap();
        let err = svc
            .enroll_participant(&lesson.id, &second, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityExceeded);
    }

    #[tokio::test]
    async fn cancelled_enrollment_frees_the_seat() {
        let svc = service();
        let lesson = svc.create_lesson(scheduling(1)).await.unwrap();
        let first = new_participant(&svc, "Nora").await;
        let second = new_participant(&svc, "Else").await;

        svc.enroll_participant(&lesson.id, &first, None)
            .await
            .unwrap();
        svc.update_enrollment_status(&lesson.id, &first, EnrollmentStatus::Cancelled)
            .await
            .unwrap();

        svc.enroll_participant(&lesson.id, &second, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn enroll_unknown_lesson_or_participant_is_not_found() {
        let svc = service();
        let lesson = svc.create_lesson(scheduling(5)).await.unwrap();
        let pid = new_participant(&svc, "Nora").await;

        let err = svc
            .enroll_participant(&LessonId::new(), &pid, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::LessonNotFound);

        let err = svc
            .enroll_participant(&lesson.id, &ParticipantId::new(), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ParticipantNotFound);
    }

    #[tokio::test]
    async fn inactive_participant_cannot_enroll_by_default() {
        let svc = service();
        let lesson = svc.create_lesson(scheduling(5)).await.unwrap();
        let pid = new_participant(&svc, "Nora").await;
        svc.delete_participant(&pid).await.unwrap();

        let err = svc
            .enroll_participant(&lesson.id, &pid, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn inactive_participant_can_enroll_when_policy_allows() {
        let svc = CourseService::with_policy(
            Arc::new(InMemoryParticipantStore::new()),
            Arc::new(InMemoryLessonStore::new()),
            ServicePolicy {
                allow_inactive_enrollment: true,
            },
        );
        let lesson = svc.create_lesson(scheduling(5)).await.unwrap();
        let pid = new_participant(&svc, "Nora").await;
        svc.delete_participant(&pid).await.unwrap();

        svc.enroll_participant(&lesson.id, &pid, None).await.unwrap();
    }

    #[tokio::test]
    async fn unenroll_is_idempotent() {
        let svc = service();
        let lesson = svc.create_lesson(scheduling(5)).await.unwrap();
        let pid = new_participant(&svc, "Nora").await;
        svc.enroll_participant(&lesson.id, &pid, None).await.unwrap();

        svc.unenroll_participant(&lesson.id, &pid).await.unwrap();
        svc.unenroll_participant(&lesson.id, &pid).await.unwrap();

        let enrollments = svc.get_enrollments_for_lesson(&lesson.id).await.unwrap();
        assert!(enrollments.is_empty());
    }

    #[tokio::test]
    async fn unenroll_unknown_lesson_is_not_found() {
        let svc = service();
        let err = svc
            .unenroll_participant(&LessonId::new(), &ParticipantId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::LessonNotFound);
    }

    #[tokio::test]
    async fn enrollments_for_unknown_lesson_are_empty() {
        let svc = service();
        let enrollments = svc
            .get_enrollments_for_lesson(&LessonId::new())
            .await
            .unwrap();
        assert!(enrollments.is_empty());
    }

    #[tokio::test]
    async fn enrollments_for_participant_scan_all_lessons() {
        let svc = service();
        let first = svc.create_lesson(scheduling(5)).await.unwrap();
        let second = svc.create_lesson(scheduling(5)).await.unwrap();
        let other = svc.create_lesson(scheduling(5)).await.unwrap();
        let pid = new_participant(&svc, "Nora").await;
        let someone_else = new_participant(&svc, "Else").await;

        svc.enroll_participant(&first.id, &pid, None).await.unwrap();
        svc.enroll_participant(&second.id, &pid, None).await.unwrap();
        svc.enroll_participant(&other.id, &someone_else, None)
            .await
            .unwrap();

        let found = svc.get_enrollments_for_participant(&pid).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|pe| pe.enrollment.participant_id == pid));
        assert!(found
            .iter()
            .all(|pe| pe.lesson.id == pe.enrollment.lesson_id));
    }

    #[tokio::test]
    async fn update_status_mutates_only_that_field() {
        let svc = service();
        let lesson = svc.create_lesson(scheduling(5)).await.unwrap();
        let pid = new_participant(&svc, "Nora").await;
        let original = svc
            .enroll_participant(&lesson.id, &pid, Some("front row".to_string()))
            .await
            .unwrap();

        let updated = svc
            .update_enrollment_status(&lesson.id, &pid, EnrollmentStatus::Completed)
            .await
            .unwrap();

        assert_eq!(updated.status, EnrollmentStatus::Completed);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.payment_status, original.payment_status);
        assert_eq!(updated.notes, original.notes);
        assert_eq!(updated.enrollment_date, original.enrollment_date);

        let enrollments = svc.get_enrollments_for_lesson(&lesson.id).await.unwrap();
        assert_eq!(enrollments[0].status, EnrollmentStatus::Completed);
    }

    #[tokio::test]
    async fn update_payment_status_works() {
        let svc = service();
        let lesson = svc.create_lesson(scheduling(5)).await.unwrap();
        let pid = new_participant(&svc, "Nora").await;
        svc.enroll_participant(&lesson.id, &pid, None).await.unwrap();

        let updated = svc
            .update_enrollment_payment_status(&lesson.id, &pid, PaymentStatus::Paid)
            .await
            .unwrap();
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert_eq!(updated.status, EnrollmentStatus::Enrolled);
    }

    #[tokio::test]
    async fn update_status_for_missing_enrollment_is_not_found() {
        let svc = service();
        let lesson = svc.create_lesson(scheduling(5)).await.unwrap();

        let err = svc
            .update_enrollment_status(
                &lesson.id,
                &ParticipantId::new(),
                EnrollmentStatus::Completed,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EnrollmentNotFound);
    }
}
