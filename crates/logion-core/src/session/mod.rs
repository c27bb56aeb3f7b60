//! Session state module.
//!
//! Holds the in-memory view of the authenticated session and the records
//! discovered for it.

mod model;

pub use model::{InvitedContributorView, Session, SessionState};
