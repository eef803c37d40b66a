//! Switchyard: interchangeable provider capabilities.
//!
//! Application code talks to five infrastructure capabilities through
//! traits and never names a concrete backend. Each capability ships with
//! in-memory adapters for tests and local development, and with a
//! conformance suite that any new backend must pass to prove it is
//! interchangeable.
//!
//! # Architecture
//!
//! Every capability follows hexagonal architecture principles:
//!
//! - **Domain**: validated value types with no infrastructure dependencies
//! - **Ports**: `async_trait` interfaces the application depends on
//! - **Adapters**: concrete implementations of the ports
//!
//! # Modules
//!
//! - [`queue`]: named JSON message queues
//! - [`email`]: outbound email and templates
//! - [`storage`]: keyed object storage with signed access URLs
//! - [`auth`]: sessions and single-sign-on authorization URLs
//! - [`events`]: domain event publishing
//! - [`providers`]: configuration-driven selection and the init-once cache
//! - [`conformance`]: table-driven suites shared by every backend

pub mod auth;
pub mod clock;
pub mod conformance;
pub mod email;
pub mod error;
pub mod events;
pub mod providers;
pub mod queue;
pub mod storage;
