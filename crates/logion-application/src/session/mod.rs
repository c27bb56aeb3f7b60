//! Session bootstrap.
//!
//! Derives the account from the configured seed, authenticates it and
//! discovers the records the demo works on.

mod bootstrapper;

pub use bootstrapper::SessionBootstrapper;
