//! Unit tests for the email capability.

mod template_tests;
