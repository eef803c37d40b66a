//! Step definitions for event fan-out scenarios.

mod given;
mod then;
mod when;
pub mod world;
