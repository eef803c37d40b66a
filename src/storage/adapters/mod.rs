//! Adapter implementations for the storage port.

pub mod filesystem;
pub mod memory;
