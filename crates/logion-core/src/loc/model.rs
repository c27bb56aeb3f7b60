//! Legal Officer Case (LOC) domain model.

use crate::account::AccountId;
use crate::hash::Hash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a LOC.
///
/// LOC ids are UUIDs; user-facing screens render them as the decimal value of
/// the underlying 128-bit number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocId(Uuid);

impl LocId {
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses either UUID notation or the decimal form.
    ///
    /// Returns `None` for anything else; callers treat that as "feature not
    /// configured" rather than as an error.
    pub fn from_any_string(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        // All-digit strings are decimal even when they would also be valid simple-form hex.
        if value.chars().all(|c| c.is_ascii_digit()) {
            return value.parse::<u128>().ok().map(|n| Self(Uuid::from_u128(n)));
        }
        Uuid::parse_str(value).ok().map(Self)
    }

    pub fn to_decimal_string(&self) -> String {
        self.0.as_u128().to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for LocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocKind {
    Transaction,
    Collection,
    Identity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocStatus {
    Draft,
    Review,
    Open,
    Closed,
    Void,
}

/// A file attached to a LOC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocFile {
    pub name: String,
    pub hash: Hash,
    pub nature: String,
    pub size: u64,
    pub submitter: AccountId,
    pub added_on: DateTime<Utc>,
}

/// Snapshot of a LOC as returned by the client SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocData {
    pub id: LocId,
    pub kind: LocKind,
    pub status: LocStatus,
    /// The legal officer in charge of the LOC.
    pub owner: AccountId,
    pub requester: Option<AccountId>,
    pub files: Vec<LocFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensRecordFile {
    pub name: String,
    pub content_type: String,
    pub hash: Hash,
    pub size: u64,
}

/// A tokens record attached to a closed collection LOC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensRecord {
    pub id: Hash,
    pub description: String,
    pub files: Vec<TokensRecordFile>,
    pub issuer: AccountId,
    pub added_on: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_id_parses_uuid_form() {
        let id = LocId::from_any_string("d61e2e12-6c06-4425-aeee-2a0e969ac14e").unwrap();
        assert_eq!(id.to_string(), "d61e2e12-6c06-4425-aeee-2a0e969ac14e");
    }

    #[test]
    fn test_loc_id_decimal_round_trip() {
        let id = LocId::from_any_string("d61e2e12-6c06-4425-aeee-2a0e969ac14e").unwrap();
        let decimal = id.to_decimal_string();
        assert!(decimal.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(LocId::from_any_string(&decimal), Some(id));
    }

    #[test]
    fn test_loc_id_rejects_garbage() {
        assert_eq!(LocId::from_any_string(""), None);
        assert_eq!(LocId::from_any_string("not-a-loc-id"), None);
        // larger than u128
        assert_eq!(
            LocId::from_any_string("999999999999999999999999999999999999999999"),
            None
        );
    }
}
