//! Lesson and enrollment REST endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::lesson_router;
