//! Unit tests for the queue capability.

mod memory_tests;
