//! Adapter implementations for the auth port.

pub mod memory;
