pub mod account;
pub mod config;
pub mod discovery;
pub mod error;
pub mod file;
pub mod hash;
pub mod loc;
pub mod session;

// Re-export common types
pub use discovery::Discovery;
pub use error::LogionError;
pub use hash::Hash;
