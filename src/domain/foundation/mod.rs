//! Shared value objects for the domain layer.

mod errors;
mod ids;
mod revision;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{EnrollmentId, LessonId, ParticipantId};
pub use revision::Revision;
pub use timestamp::Timestamp;
