//! Port traits implemented by infrastructure adapters.

mod lesson_store;
mod participant_store;

pub use lesson_store::LessonStore;
pub use participant_store::ParticipantStore;
