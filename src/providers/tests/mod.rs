//! Unit tests for provider wiring.

mod factory_tests;
