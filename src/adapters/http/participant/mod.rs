//! Participant REST endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::participant_router;
