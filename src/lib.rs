//! Bakehouse - Course Management Backend
//!
//! This crate implements participant registration, lesson scheduling, and
//! enrollment lifecycle tracking for a baking school, backed by a
//! document store.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
