//! Adapter implementations for the queue port.

pub mod memory;
