//! Application layer for the Logion demo.
//!
//! This crate provides the actions behind the demo screen. They coordinate
//! the client SDK ports of `logion-core` and never touch a concrete network.

pub mod collection;
pub mod demo_usecase;
pub mod guard;
pub mod session;
pub mod view;

pub use collection::{DraftCollectionMutator, TokensRecordMutator};
pub use demo_usecase::DemoUseCase;
pub use guard::{ActionGuard, ActionPermit};
pub use session::SessionBootstrapper;
pub use view::{Section, SessionView};
