//! Adapter implementations for the email sender port.

pub mod log;
pub mod memory;
