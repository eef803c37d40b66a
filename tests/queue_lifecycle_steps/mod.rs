//! Step definitions for queue lifecycle scenarios.

mod given;
mod then;
mod when;
pub mod world;
