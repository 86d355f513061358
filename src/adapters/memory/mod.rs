//! In-memory store adapters for testing and development.

mod lesson_store;
mod participant_store;

pub use lesson_store::InMemoryLessonStore;
pub use participant_store::InMemoryParticipantStore;
