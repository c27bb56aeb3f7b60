//! Account domain module.
//!
//! - `model`: account identifiers, key pairs and signatures
//! - `keyring`: keyring/signer ports implemented outside the core

mod keyring;
mod model;

pub use keyring::{Keyring, Signer};
pub use model::{AccountId, AccountType, KeyPair, Signature, SignatureScheme};
