//! Sandbox network controller.
//!
//! An in-memory stand-in for a Logion network: it stores LOCs and tokens
//! records, issues bearer tokens, logs every SDK call and lets tests inject
//! faults and latency.

use chrono::Utc;
use logion_core::account::AccountId;
use logion_core::error::{LogionError, Result};
use logion_core::hash::Hash;
use logion_core::loc::{AccessToken, LocData, LocFile, LocId, LocKind, LocStatus, TokensRecord};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

/// Environment names the sandbox accepts.
pub const KNOWN_ENVIRONMENTS: [&str; 4] = ["DEV", "TEST", "MVP", "sandbox"];

/// Kind of SDK call, used for fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdkOperation {
    CreateClient,
    Authenticate,
    LocsState,
    FindInvitedContributorLoc,
    GetTokensRecords,
    AddFile,
    AddTokensRecord,
}

/// One SDK call as observed by the sandbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkCall {
    CreateClient {
        target: String,
    },
    Authenticate {
        accounts: Vec<AccountId>,
    },
    LocsState {
        account: AccountId,
    },
    FindInvitedContributorLoc {
        loc_id: LocId,
    },
    GetTokensRecords {
        loc_id: LocId,
        with_token: bool,
    },
    AddFile {
        loc_id: LocId,
        nature: String,
        file_name: String,
    },
    AddTokensRecord {
        loc_id: LocId,
        record_id: Hash,
        description: String,
        file_names: Vec<String>,
    },
}

impl SdkCall {
    pub fn operation(&self) -> SdkOperation {
        match self {
            SdkCall::CreateClient { .. } => SdkOperation::CreateClient,
            SdkCall::Authenticate { .. } => SdkOperation::Authenticate,
            SdkCall::LocsState { .. } => SdkOperation::LocsState,
            SdkCall::FindInvitedContributorLoc { .. } => SdkOperation::FindInvitedContributorLoc,
            SdkCall::GetTokensRecords { .. } => SdkOperation::GetTokensRecords,
            SdkCall::AddFile { .. } => SdkOperation::AddFile,
            SdkCall::AddTokensRecord { .. } => SdkOperation::AddTokensRecord,
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self.operation(),
            SdkOperation::AddFile | SdkOperation::AddTokensRecord
        )
    }
}

/// Records held by the sandbox.
#[derive(Debug, Default)]
struct Ledger {
    /// LOCs in creation order; listing order follows it.
    locs: Vec<LocData>,
    invited_contributors: HashMap<LocId, Vec<AccountId>>,
    tokens_records: HashMap<LocId, Vec<TokensRecord>>,
    tokens: HashMap<String, AccountId>,
}

impl Ledger {
    fn loc_mut(&mut self, loc_id: LocId) -> Option<&mut LocData> {
        self.locs.iter_mut().find(|loc| loc.id == loc_id)
    }

    fn loc(&self, loc_id: LocId) -> Option<&LocData> {
        self.locs.iter().find(|loc| loc.id == loc_id)
    }
}

/// Shared interior of the sandbox network.
#[derive(Default)]
pub(crate) struct SandboxNetworkInner {
    ledger: RwLock<Ledger>,
    /// Every call in arrival order.
    calls: Mutex<Vec<SdkCall>>,
    /// Operations whose next call fails with a network error.
    failures: Mutex<HashSet<SdkOperation>>,
    /// Accounts whose authentication challenge is rejected.
    rejected_accounts: Mutex<HashSet<AccountId>>,
    latency: Mutex<Option<Duration>>,
}

/// Handle to a sandbox network. Cloning shares the same ledger.
#[derive(Clone, Default)]
pub struct SandboxNetwork {
    pub(crate) inner: Arc<SandboxNetworkInner>,
}

impl SandboxNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================================
    // Test controls
    // ============================================================================

    /// Makes the next call of `operation` fail with a network error.
    pub fn fail_next(&self, operation: SdkOperation) {
        lock(&self.inner.failures).insert(operation);
    }

    /// Rejects every authentication challenge for `account`.
    pub fn reject_authentication(&self, account: AccountId) {
        lock(&self.inner.rejected_accounts).insert(account);
    }

    /// Delays every call by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *lock(&self.inner.latency) = latency;
    }

    pub fn calls(&self) -> Vec<SdkCall> {
        lock(&self.inner.calls).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.inner.calls).clear();
    }

    // ============================================================================
    // Ledger setup and inspection
    // ============================================================================

    pub async fn insert_loc(&self, loc: LocData) {
        self.inner.ledger.write().await.locs.push(loc);
    }

    pub async fn invite_contributor(&self, loc_id: LocId, account: AccountId) {
        self.inner
            .ledger
            .write()
            .await
            .invited_contributors
            .entry(loc_id)
            .or_default()
            .push(account);
    }

    /// Appends a tokens record as if another contributor had submitted it.
    pub async fn insert_tokens_record(&self, loc_id: LocId, record: TokensRecord) {
        self.inner
            .ledger
            .write()
            .await
            .tokens_records
            .entry(loc_id)
            .or_default()
            .push(record);
    }

    pub async fn loc(&self, loc_id: LocId) -> Option<LocData> {
        self.inner.ledger.read().await.loc(loc_id).cloned()
    }

    pub async fn tokens_records(&self, loc_id: LocId) -> Vec<TokensRecord> {
        self.inner
            .ledger
            .read()
            .await
            .tokens_records
            .get(&loc_id)
            .cloned()
            .unwrap_or_default()
    }

    // ============================================================================
    // Operations used by the sandbox client
    // ============================================================================

    /// Logs the call, applies latency and any injected failure.
    pub(crate) async fn enter(&self, call: SdkCall) -> Result<()> {
        let operation = call.operation();
        tracing::debug!("[Sandbox] {:?}", call);
        lock(&self.inner.calls).push(call);

        let latency = *lock(&self.inner.latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if lock(&self.inner.failures).remove(&operation) {
            tracing::warn!("[Sandbox] Injected failure for {:?}", operation);
            return Err(LogionError::network(format!(
                "sandbox: injected failure for {:?}",
                operation
            )));
        }
        Ok(())
    }

    pub(crate) fn is_rejected(&self, account: &AccountId) -> bool {
        lock(&self.inner.rejected_accounts).contains(account)
    }

    pub(crate) async fn issue_token(&self, account: &AccountId) -> AccessToken {
        use base64::Engine;
        let raw = format!("{}:{}", account.address, uuid::Uuid::new_v4().simple());
        let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw);
        self.inner
            .ledger
            .write()
            .await
            .tokens
            .insert(token.clone(), account.clone());
        AccessToken::new(token)
    }

    pub(crate) async fn token_owner(&self, token: &AccessToken) -> Option<AccountId> {
        self.inner
            .ledger
            .read()
            .await
            .tokens
            .get(token.as_str())
            .cloned()
    }

    /// Closed LOCs and drafts requested by `account`, in creation order.
    pub(crate) async fn locs_of(&self, account: &AccountId) -> Vec<LocData> {
        self.inner
            .ledger
            .read()
            .await
            .locs
            .iter()
            .filter(|loc| loc.requester.as_ref() == Some(account))
            .cloned()
            .collect()
    }

    pub(crate) async fn invited_collection(
        &self,
        loc_id: LocId,
        account: &AccountId,
    ) -> Option<LocData> {
        let ledger = self.inner.ledger.read().await;
        let invited = ledger
            .invited_contributors
            .get(&loc_id)
            .is_some_and(|accounts| accounts.contains(account));
        ledger
            .loc(loc_id)
            .filter(|loc| {
                invited && loc.kind == LocKind::Collection && loc.status == LocStatus::Closed
            })
            .cloned()
    }

    pub(crate) async fn append_file(
        &self,
        loc_id: LocId,
        requester: &AccountId,
        file: LocFile,
    ) -> Result<LocData> {
        let mut ledger = self.inner.ledger.write().await;
        let loc = ledger
            .loc_mut(loc_id)
            .ok_or_else(|| LogionError::not_found("LOC", loc_id.to_string()))?;

        if loc.status != LocStatus::Draft {
            return Err(LogionError::invalid_input(format!(
                "LOC {} is {:?}, files can only be added to drafts",
                loc_id, loc.status
            )));
        }
        if loc.requester.as_ref() != Some(requester) {
            return Err(LogionError::authentication(format!(
                "{} is not the requester of LOC {}",
                requester, loc_id
            )));
        }
        if loc.files.iter().any(|f| f.hash == file.hash) {
            return Err(LogionError::invalid_input(format!(
                "LOC {} already has a file with hash {}",
                loc_id, file.hash
            )));
        }

        loc.files.push(file);
        Ok(loc.clone())
    }

    pub(crate) async fn append_tokens_record(
        &self,
        loc_id: LocId,
        record: TokensRecord,
    ) -> Result<LocData> {
        let mut ledger = self.inner.ledger.write().await;
        let loc = ledger
            .loc(loc_id)
            .cloned()
            .ok_or_else(|| LogionError::not_found("LOC", loc_id.to_string()))?;
        let invited = ledger
            .invited_contributors
            .get(&loc_id)
            .is_some_and(|accounts| accounts.contains(&record.issuer));
        if !invited {
            return Err(LogionError::authentication(format!(
                "{} is not invited to contribute to LOC {}",
                record.issuer, loc_id
            )));
        }

        let records = ledger.tokens_records.entry(loc_id).or_default();
        if records.iter().any(|r| r.id == record.id) {
            return Err(LogionError::invalid_input(format!(
                "tokens record {} already exists in LOC {}",
                record.id, loc_id
            )));
        }
        records.push(record);
        Ok(loc)
    }
}

/// Builds a LOC snapshot with no files.
pub fn new_loc(
    kind: LocKind,
    status: LocStatus,
    owner: AccountId,
    requester: Option<AccountId>,
) -> LocData {
    LocData {
        id: LocId::generate(),
        kind,
        status,
        owner,
        requester,
        files: Vec::new(),
    }
}

/// Builds a tokens record with no files, as a third party would submit it.
pub fn new_tokens_record(label: &str, issuer: AccountId) -> TokensRecord {
    TokensRecord {
        id: Hash::of(label),
        description: format!("Seeded {}", label),
        files: Vec::new(),
        issuer,
        added_on: Utc::now(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    // A panicking test thread must not poison the controls for the others.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(address: &str) -> AccountId {
        AccountId::polkadot(address).unwrap()
    }

    #[tokio::test]
    async fn test_enter_logs_and_consumes_injected_failure() {
        let network = SandboxNetwork::new();
        network.fail_next(SdkOperation::LocsState);

        let call = SdkCall::LocsState {
            account: account("5Alice"),
        };
        assert!(network.enter(call.clone()).await.unwrap_err().is_network());
        assert!(network.enter(call).await.is_ok());
        assert_eq!(network.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_locs_of_filters_by_requester_and_keeps_order() {
        let network = SandboxNetwork::new();
        let alice = account("5Alice");
        let officer = account("5Officer");

        let first = new_loc(LocKind::Collection, LocStatus::Draft, officer.clone(), Some(alice.clone()));
        let other = new_loc(LocKind::Collection, LocStatus::Draft, officer.clone(), Some(account("5Bob")));
        let second = new_loc(LocKind::Identity, LocStatus::Closed, officer, Some(alice.clone()));
        network.insert_loc(first.clone()).await;
        network.insert_loc(other).await;
        network.insert_loc(second.clone()).await;

        let ids: Vec<LocId> = network.locs_of(&alice).await.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_invited_collection_requires_invitation_and_closed_status() {
        let network = SandboxNetwork::new();
        let alice = account("5Alice");
        let officer = account("5Officer");
        let loc = new_loc(LocKind::Collection, LocStatus::Closed, officer, Some(account("5Bob")));
        network.insert_loc(loc.clone()).await;

        assert!(network.invited_collection(loc.id, &alice).await.is_none());
        network.invite_contributor(loc.id, alice.clone()).await;
        assert!(network.invited_collection(loc.id, &alice).await.is_some());
    }

    #[tokio::test]
    async fn test_append_tokens_record_rejects_duplicates() {
        let network = SandboxNetwork::new();
        let alice = account("5Alice");
        let loc = new_loc(LocKind::Collection, LocStatus::Closed, account("5Officer"), None);
        network.insert_loc(loc.clone()).await;
        network.invite_contributor(loc.id, alice.clone()).await;

        let record = new_tokens_record("Record #0", alice.clone());
        network.append_tokens_record(loc.id, record.clone()).await.unwrap();
        let err = network.append_tokens_record(loc.id, record).await.unwrap_err();
        assert!(matches!(err, LogionError::InvalidInput(_)));
        assert_eq!(network.tokens_records(loc.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_tokens_are_bound_to_accounts() {
        let network = SandboxNetwork::new();
        let alice = account("5Alice");
        let token = network.issue_token(&alice).await;
        assert_eq!(network.token_owner(&token).await, Some(alice));
        assert_eq!(network.token_owner(&AccessToken::new("forged")).await, None);
    }
}
