//! Keyring and signer ports.
//!
//! Key derivation and signing belong to an external keyring library. This
//! module only defines the contracts the bootstrapper relies on.

use super::model::{AccountId, KeyPair, Signature, SignatureScheme};
use crate::error::Result;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Produces signatures for accounts whose key pairs live in a keyring.
#[async_trait]
pub trait Signer: Send + Sync + Debug {
    /// Signs `message` on behalf of `account`.
    ///
    /// Fails when the keyring holds no key pair for that account.
    async fn sign(&self, account: &AccountId, message: &[u8]) -> Result<Signature>;
}

/// A keyring deriving key pairs deterministically from seed URIs.
pub trait Keyring: Send + Sync {
    /// The scheme every pair of this keyring uses.
    fn scheme(&self) -> SignatureScheme;

    /// Derives (and remembers) the key pair for a seed phrase or URI.
    ///
    /// The same URI always yields the same pair.
    fn add_from_uri(&self, uri: &str) -> Result<KeyPair>;

    /// Returns a signer backed by the pairs added so far.
    fn signer(&self) -> Arc<dyn Signer>;
}
