//! Unit tests for the storage capability.

mod filesystem_tests;
mod memory_tests;
