//! Adapter implementations for the outbound and inbound ports.

pub mod http;
pub mod memory;
pub mod postgres;
