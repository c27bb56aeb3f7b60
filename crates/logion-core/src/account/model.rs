//! Account domain model.

use crate::error::{LogionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address family of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Polkadot,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Polkadot => write!(f, "Polkadot"),
        }
    }
}

/// A validated, externally addressable account identifier.
///
/// Equality is by value: two ids built from the same address compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId {
    pub account_type: AccountType,
    pub address: String,
}

impl AccountId {
    /// Builds a Polkadot account id, rejecting blank or non-alphanumeric addresses.
    pub fn polkadot(address: impl AsRef<str>) -> Result<Self> {
        let address = address.as_ref().trim();
        if address.is_empty() {
            return Err(LogionError::invalid_input("account address is empty"));
        }
        if !address.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(LogionError::invalid_input(format!(
                "account address '{}' contains invalid characters",
                address
            )));
        }
        Ok(Self {
            account_type: AccountType::Polkadot,
            address: address.to_string(),
        })
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.account_type, self.address)
    }
}

/// Signature scheme used when deriving key pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureScheme {
    Sr25519,
}

/// A key pair derived by a keyring. Only the public half is exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub scheme: SignatureScheme,
    pub public_key: Vec<u8>,
    pub address: String,
}

/// A detached signature together with the account that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub signer: AccountId,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polkadot_account_equality_by_value() {
        let a = AccountId::polkadot("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY").unwrap();
        let b = AccountId::polkadot(" 5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY ").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.account_type, AccountType::Polkadot);
    }

    #[test]
    fn test_polkadot_account_rejects_blank() {
        assert!(AccountId::polkadot("   ").is_err());
    }

    #[test]
    fn test_polkadot_account_rejects_invalid_characters() {
        let err = AccountId::polkadot("not an address").unwrap_err();
        assert!(matches!(err, LogionError::InvalidInput(_)));
    }
}
