//! Domain layer: entity model and the course management service.

pub mod enrollment;
pub mod foundation;
pub mod lesson;
pub mod participant;
pub mod service;
