//! Client SDK ports.
//!
//! These traits describe the call/response contracts of the external Logion
//! client. Authentication, hashing, submission and record state transitions
//! happen behind them; the workflows in `logion-application` only sequence
//! the calls.

use super::model::{LocData, LocId, LocKind, TokensRecord};
use crate::account::{AccountId, Signer};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::file::FilePayload;
use crate::hash::Hash;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Bearer token issued on successful authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Creates unauthenticated clients.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn create_with_config(&self, config: &ClientConfig) -> Result<Arc<dyn LogionClient>>;

    async fn create_for_env(&self, env: &str) -> Result<Arc<dyn LogionClient>>;
}

/// An unauthenticated client.
#[async_trait]
pub trait LogionClient: Send + Sync {
    /// Returns a client bound to `account`. Does not contact the network.
    fn with_current_account(&self, account: &AccountId) -> Arc<dyn LogionClient>;

    /// Runs the challenge/response handshake for `accounts` using `signer`.
    ///
    /// Fails with `LogionError::Authentication` when the challenge is rejected.
    async fn authenticate(
        &self,
        accounts: &[AccountId],
        signer: Arc<dyn Signer>,
    ) -> Result<Arc<dyn AuthenticatedClient>>;
}

/// Closed LOCs and draft requests of the current account, by kind.
#[derive(Debug, Clone, Default)]
pub struct LocsState {
    pub closed_locs: HashMap<LocKind, Vec<LocData>>,
    pub draft_requests: HashMap<LocKind, Vec<Arc<dyn DraftRequest>>>,
}

impl LocsState {
    pub fn closed(&self, kind: LocKind) -> &[LocData] {
        self.closed_locs.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn drafts(&self, kind: LocKind) -> &[Arc<dyn DraftRequest>] {
        self.draft_requests
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A client holding a valid session for its current account.
#[async_trait]
pub trait AuthenticatedClient: Send + Sync {
    /// Bearer token of the current session, if one was issued.
    fn token(&self) -> Option<AccessToken>;

    async fn locs_state(&self) -> Result<LocsState>;

    /// Looks up a closed collection the current account was invited to
    /// contribute to.
    async fn find_invited_contributor_loc(
        &self,
        loc_id: LocId,
    ) -> Result<Option<Arc<dyn InvitedContributorLoc>>>;

    /// Public read of a collection's tokens records, authorized by bearer token.
    ///
    /// `Ok(None)` means the backend returned nothing for this caller.
    async fn get_tokens_records(
        &self,
        loc_id: LocId,
        token: Option<&AccessToken>,
    ) -> Result<Option<Vec<TokensRecord>>>;
}

#[derive(Debug, Clone)]
pub struct AddFileParams {
    pub file: FilePayload,
    pub nature: String,
}

#[derive(Debug, Clone)]
pub struct TokensRecordPayload {
    pub record_id: Hash,
    pub description: String,
    pub files: Vec<FilePayload>,
}

/// A draft LOC request. Mutations return a fresh view; `self` is left as is.
#[async_trait]
pub trait DraftRequest: Send + Sync + Debug {
    fn data(&self) -> &LocData;

    async fn add_file(&self, params: AddFileParams) -> Result<Arc<dyn DraftRequest>>;
}

/// A closed collection LOC seen from an invited contributor.
#[async_trait]
pub trait InvitedContributorLoc: Send + Sync + Debug {
    fn data(&self) -> &LocData;

    async fn add_tokens_record(
        &self,
        signer: Arc<dyn Signer>,
        payload: TokensRecordPayload,
    ) -> Result<Arc<dyn InvitedContributorLoc>>;
}
