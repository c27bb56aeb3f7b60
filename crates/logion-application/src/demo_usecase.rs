//! Demo use case implementation.
//!
//! This module provides the `DemoUseCase` which owns the current
//! `SessionState` and runs the user-triggered actions against it.

use crate::collection::{DraftCollectionMutator, TokensRecordMutator};
use crate::guard::ActionGuard;
use crate::session::SessionBootstrapper;
use crate::view::SessionView;
use logion_core::error::Result;
use logion_core::session::SessionState;
use tokio::sync::RwLock;

/// Use case driving the demo screen.
///
/// # Responsibilities
///
/// - Holding the single `SessionState` the screen is rendered from
/// - Running `connect`, `add_file` and `add_tokens_record` against a snapshot
///   of that state
/// - Committing the result only when the action succeeded
/// - Rejecting a second trigger of an action while the first is outstanding
///
/// # Commit rules
///
/// Actions run without holding the state lock across SDK calls, so different
/// actions may interleave. Each one therefore commits only the part it owns:
/// `connect` installs the whole state if no session was installed meanwhile,
/// `add_file` replaces the draft collection view and `add_tokens_record`
/// replaces the invited-contributor view. An action with nothing to do on its
/// snapshot commits nothing.
pub struct DemoUseCase {
    bootstrapper: SessionBootstrapper,
    draft_mutator: DraftCollectionMutator,
    tokens_record_mutator: TokensRecordMutator,
    state: RwLock<SessionState>,
    connect_guard: ActionGuard,
    add_file_guard: ActionGuard,
    add_tokens_record_guard: ActionGuard,
}

impl DemoUseCase {
    pub fn new(
        bootstrapper: SessionBootstrapper,
        draft_mutator: DraftCollectionMutator,
        tokens_record_mutator: TokensRecordMutator,
    ) -> Self {
        Self {
            bootstrapper,
            draft_mutator,
            tokens_record_mutator,
            state: RwLock::new(SessionState::default()),
            connect_guard: ActionGuard::new("connect"),
            add_file_guard: ActionGuard::new("add-file"),
            add_tokens_record_guard: ActionGuard::new("add-tokens-record"),
        }
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Renders the current state.
    pub async fn view(&self) -> SessionView {
        SessionView::from_state(&*self.state.read().await)
    }

    /// Connects and discovers the session records.
    ///
    /// On error the current state is kept and `connect` may be retried.
    pub async fn connect(&self) -> Result<SessionState> {
        let _permit = self.connect_guard.try_acquire()?;
        let current = self.snapshot().await;
        let next = self.bootstrapper.connect(&current).await?;

        let mut state = self.state.write().await;
        if !state.is_connected() {
            *state = next;
        }
        Ok(state.clone())
    }

    /// Adds the next demo file to the draft collection.
    pub async fn add_file(&self) -> Result<SessionState> {
        let _permit = self.add_file_guard.try_acquire()?;
        let current = self.snapshot().await;
        if !DraftCollectionMutator::can_add_file(&current) {
            return Ok(current);
        }
        let next = self.draft_mutator.add_file(&current).await?;

        let mut state = self.state.write().await;
        state.draft_collection = next.draft_collection;
        Ok(state.clone())
    }

    /// Adds the next demo tokens record to the invited collection.
    pub async fn add_tokens_record(&self) -> Result<SessionState> {
        let _permit = self.add_tokens_record_guard.try_acquire()?;
        let current = self.snapshot().await;
        if !TokensRecordMutator::can_add_tokens_record(&current) {
            return Ok(current);
        }
        let next = self.tokens_record_mutator.add_tokens_record(&current).await?;

        let mut state = self.state.write().await;
        state.invited_contributor = next.invited_contributor;
        Ok(state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logion_core::account::{AccountId, Keyring};
    use logion_core::config::{SandboxFixture, SecretConfig, SessionSettings};
    use logion_infrastructure::CacheFileMaterializer;
    use logion_infrastructure::sandbox::{
        FixtureAccounts, SandboxClientFactory, SandboxKeyring, SandboxNetwork,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    const SEED: &str = "//Alice";
    const OFFICER: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const COLLECTION: &str = "d61e2e12-6c06-4425-aeee-2a0e969ac14e";

    async fn usecase(fixture: SandboxFixture, temp: &TempDir) -> DemoUseCase {
        let pair = SandboxKeyring::new().add_from_uri(SEED).unwrap();
        let requester = AccountId::polkadot(&pair.address).unwrap();
        let legal_officer = AccountId::polkadot(OFFICER).unwrap();

        let network = SandboxNetwork::new();
        let accounts = FixtureAccounts {
            requester,
            legal_officer: legal_officer.clone(),
            collection_owner: AccountId::polkadot("5CollectionOwner").unwrap(),
        };
        network.seed(&fixture, &accounts, COLLECTION).await.unwrap();

        let settings = SessionSettings {
            env: "DEV".to_string(),
            client: None,
            user_seed: SecretConfig {
                user_seed: SEED.to_string(),
            },
            legal_officer,
            collection_loc_id: COLLECTION.to_string(),
        };
        let materializer = Arc::new(CacheFileMaterializer::new(temp.path()));
        DemoUseCase::new(
            SessionBootstrapper::new(
                Arc::new(SandboxClientFactory::new(network)),
                Arc::new(SandboxKeyring::new()),
                settings,
            ),
            DraftCollectionMutator::new(materializer.clone()),
            TokensRecordMutator::new(materializer),
        )
    }

    // A commit would need the write lock, which the held reader blocks.
    #[tokio::test]
    async fn test_noop_actions_do_not_commit() {
        let temp = TempDir::new().unwrap();
        let usecase = usecase(SandboxFixture::default(), &temp).await;

        let _reader = usecase.state.read().await;
        let file = tokio::time::timeout(Duration::from_secs(1), usecase.add_file()).await;
        let record =
            tokio::time::timeout(Duration::from_secs(1), usecase.add_tokens_record()).await;

        assert!(file.unwrap().unwrap().draft_collection.is_unknown());
        assert!(record.unwrap().unwrap().invited_contributor.is_unknown());
    }
}
