//! Course management service.
//!
//! `CourseService` is the domain core: it enforces the business rules
//! (soft-delete semantics, enrollment capacity, duplicate enrollment,
//! lesson delete guard) on top of the injected store ports. All
//! enrollment state lives inside the lesson document, so enrollment
//! mutations are read-modify-write cycles on the owning lesson,
//! replayed on revision conflict.
//!
//! The service does not log and never retries store failures other than
//! revision conflicts; everything else propagates to the caller.

mod enrollments;
mod lessons;
mod participants;

pub use enrollments::ParticipantEnrollment;
pub use lessons::LessonRoster;

use std::sync::Arc;

use crate::ports::{LessonStore, ParticipantStore};

/// Attempts per read-modify-write cycle before a revision conflict is
/// surfaced to the caller.
const MAX_REPLACE_ATTEMPTS: u32 = 3;

/// Behavior switches for rules the business has left open.
#[derive(Debug, Clone, Copy)]
pub struct ServicePolicy {
    /// Whether a soft-deleted participant may be newly enrolled.
    pub allow_inactive_enrollment: bool,
}

impl Default for ServicePolicy {
    fn default() -> Self {
        Self {
            allow_inactive_enrollment: false,
        }
    }
}

/// Domain service for participants, lessons, and enrollments.
#[derive(Clone)]
pub struct CourseService {
    participants: Arc<dyn ParticipantStore>,
    lessons: Arc<dyn LessonStore>,
    policy: ServicePolicy,
}

impl CourseService {
    /// Creates a service over the given store adapters with the default
    /// policy.
    pub fn new(participants: Arc<dyn ParticipantStore>, lessons: Arc<dyn LessonStore>) -> Self {
        Self::with_policy(participants, lessons, ServicePolicy::default())
    }

    /// Creates a service with an explicit policy.
    pub fn with_policy(
        participants: Arc<dyn ParticipantStore>,
        lessons: Arc<dyn LessonStore>,
        policy: ServicePolicy,
    ) -> Self {
        Self {
            participants,
            lessons,
            policy,
        }
    }

    pub(crate) fn participant_store(&self) -> &dyn ParticipantStore {
        self.participants.as_ref()
    }

    pub(crate) fn lesson_store(&self) -> &dyn LessonStore {
        self.lessons.as_ref()
    }

    pub(crate) fn policy(&self) -> &ServicePolicy {
        &self.policy
    }

    pub(crate) fn max_replace_attempts() -> u32 {
        MAX_REPLACE_ATTEMPTS
    }

    /// Probes both store containers.
    pub async fn check_store(&self) -> Result<(), crate::domain::foundation::DomainError> {
        self.participants.ping().await?;
        self.lessons.ping().await?;
        Ok(())
    }
}
