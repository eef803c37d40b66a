//! Unit tests for the auth capability.
