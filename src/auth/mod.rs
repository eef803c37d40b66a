//! Authentication and session capability.
//!
//! Sessions move from active to invalid when they expire or are
//! invalidated; invalid is terminal. The capability also builds the
//! redirect URL that starts an external single-sign-on flow with PKCE.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
