//! Sandbox implementations of the client SDK ports.

use super::keyring;
use super::network::{KNOWN_ENVIRONMENTS, SandboxNetwork, SdkCall};
use async_trait::async_trait;
use chrono::Utc;
use logion_core::account::{AccountId, Signer};
use logion_core::config::ClientConfig;
use logion_core::error::{LogionError, Result};
use logion_core::file::FilePayload;
use logion_core::hash::Hash;
use logion_core::loc::{
    AccessToken, AddFileParams, AuthenticatedClient, ClientFactory, DraftRequest,
    InvitedContributorLoc, LocData, LocFile, LocId, LocStatus, LocsState, LogionClient,
    TokensRecord, TokensRecordFile, TokensRecordPayload,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Reads a payload from disk and returns its hash and size, the way the SDK
/// does before uploading.
async fn read_payload(file: &FilePayload) -> Result<(Hash, u64)> {
    let content = tokio::fs::read(&file.path).await?;
    Ok((Hash::of_bytes(&content), content.len() as u64))
}

// ============================================================================
// Factory
// ============================================================================

pub struct SandboxClientFactory {
    network: SandboxNetwork,
}

impl SandboxClientFactory {
    pub fn new(network: SandboxNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &SandboxNetwork {
        &self.network
    }
}

#[async_trait]
impl ClientFactory for SandboxClientFactory {
    async fn create_with_config(&self, config: &ClientConfig) -> Result<Arc<dyn LogionClient>> {
        self.network
            .enter(SdkCall::CreateClient {
                target: config.directory_endpoint.clone(),
            })
            .await?;

        if config.directory_endpoint.trim().is_empty() {
            return Err(LogionError::config("directory endpoint is empty"));
        }

        Ok(Arc::new(SandboxClient {
            network: self.network.clone(),
            target: config.directory_endpoint.clone(),
            current_account: None,
        }))
    }

    async fn create_for_env(&self, env: &str) -> Result<Arc<dyn LogionClient>> {
        self.network
            .enter(SdkCall::CreateClient {
                target: env.to_string(),
            })
            .await?;

        let known = KNOWN_ENVIRONMENTS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(env));
        if !known {
            return Err(LogionError::config(format!(
                "unknown network environment '{}' (expected one of {})",
                env,
                KNOWN_ENVIRONMENTS.join(", ")
            )));
        }

        Ok(Arc::new(SandboxClient {
            network: self.network.clone(),
            target: env.to_string(),
            current_account: None,
        }))
    }
}

// ============================================================================
// Unauthenticated client
// ============================================================================

pub struct SandboxClient {
    network: SandboxNetwork,
    target: String,
    current_account: Option<AccountId>,
}

#[async_trait]
impl LogionClient for SandboxClient {
    fn with_current_account(&self, account: &AccountId) -> Arc<dyn LogionClient> {
        Arc::new(SandboxClient {
            network: self.network.clone(),
            target: self.target.clone(),
            current_account: Some(account.clone()),
        })
    }

    async fn authenticate(
        &self,
        accounts: &[AccountId],
        signer: Arc<dyn Signer>,
    ) -> Result<Arc<dyn AuthenticatedClient>> {
        self.network
            .enter(SdkCall::Authenticate {
                accounts: accounts.to_vec(),
            })
            .await?;

        let current = self
            .current_account
            .clone()
            .or_else(|| accounts.first().cloned())
            .ok_or_else(|| LogionError::authentication("no account to authenticate"))?;
        if !accounts.contains(&current) {
            return Err(LogionError::authentication(format!(
                "current account {} is not among the authenticated accounts",
                current
            )));
        }

        let mut tokens = HashMap::new();
        for account in accounts {
            let challenge = uuid::Uuid::new_v4();
            let signature = signer.sign(account, challenge.as_bytes()).await?;
            if signature.signer != *account {
                return Err(LogionError::authentication(format!(
                    "challenge for {} signed by {}",
                    account, signature.signer
                )));
            }
            keyring::verify(challenge.as_bytes(), &signature)?;
            if self.network.is_rejected(account) {
                return Err(LogionError::authentication(format!(
                    "challenge rejected for {}",
                    account
                )));
            }
            tokens.insert(account.clone(), self.network.issue_token(account).await);
        }

        tracing::debug!(
            "[Sandbox] Authenticated {} account(s) on {}",
            tokens.len(),
            self.target
        );

        let token = tokens.get(&current).cloned();
        Ok(Arc::new(SandboxAuthenticatedClient {
            network: self.network.clone(),
            account: current,
            token,
        }))
    }
}

// ============================================================================
// Authenticated client
// ============================================================================

pub struct SandboxAuthenticatedClient {
    network: SandboxNetwork,
    account: AccountId,
    token: Option<AccessToken>,
}

#[async_trait]
impl AuthenticatedClient for SandboxAuthenticatedClient {
    fn token(&self) -> Option<AccessToken> {
        self.token.clone()
    }

    async fn locs_state(&self) -> Result<LocsState> {
        self.network
            .enter(SdkCall::LocsState {
                account: self.account.clone(),
            })
            .await?;

        let mut state = LocsState::default();
        for loc in self.network.locs_of(&self.account).await {
            match loc.status {
                LocStatus::Closed => {
                    state.closed_locs.entry(loc.kind).or_default().push(loc);
                }
                LocStatus::Draft => {
                    let kind = loc.kind;
                    let draft: Arc<dyn DraftRequest> = Arc::new(SandboxDraftRequest {
                        network: self.network.clone(),
                        requester: self.account.clone(),
                        data: loc,
                    });
                    state.draft_requests.entry(kind).or_default().push(draft);
                }
                LocStatus::Review | LocStatus::Open | LocStatus::Void => {}
            }
        }
        Ok(state)
    }

    async fn find_invited_contributor_loc(
        &self,
        loc_id: LocId,
    ) -> Result<Option<Arc<dyn InvitedContributorLoc>>> {
        self.network
            .enter(SdkCall::FindInvitedContributorLoc { loc_id })
            .await?;

        Ok(self
            .network
            .invited_collection(loc_id, &self.account)
            .await
            .map(|data| {
                Arc::new(SandboxInvitedContributorLoc {
                    network: self.network.clone(),
                    contributor: self.account.clone(),
                    data,
                }) as Arc<dyn InvitedContributorLoc>
            }))
    }

    async fn get_tokens_records(
        &self,
        loc_id: LocId,
        token: Option<&AccessToken>,
    ) -> Result<Option<Vec<TokensRecord>>> {
        self.network
            .enter(SdkCall::GetTokensRecords {
                loc_id,
                with_token: token.is_some(),
            })
            .await?;

        let Some(token) = token else {
            return Ok(None);
        };
        if self.network.token_owner(token).await.is_none() {
            return Err(LogionError::authentication("unknown bearer token"));
        }
        if self.network.loc(loc_id).await.is_none() {
            return Ok(None);
        }
        Ok(Some(self.network.tokens_records(loc_id).await))
    }
}

// ============================================================================
// Record views
// ============================================================================

pub struct SandboxDraftRequest {
    network: SandboxNetwork,
    requester: AccountId,
    data: LocData,
}

impl fmt::Debug for SandboxDraftRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SandboxDraftRequest")
            .field("id", &self.data.id)
            .field("files", &self.data.files.len())
            .finish()
    }
}

#[async_trait]
impl DraftRequest for SandboxDraftRequest {
    fn data(&self) -> &LocData {
        &self.data
    }

    async fn add_file(&self, params: AddFileParams) -> Result<Arc<dyn DraftRequest>> {
        self.network
            .enter(SdkCall::AddFile {
                loc_id: self.data.id,
                nature: params.nature.clone(),
                file_name: params.file.name.clone(),
            })
            .await?;

        let (hash, size) = read_payload(&params.file).await?;
        let file = LocFile {
            name: params.file.name,
            hash,
            nature: params.nature,
            size,
            submitter: self.requester.clone(),
            added_on: Utc::now(),
        };
        let data = self
            .network
            .append_file(self.data.id, &self.requester, file)
            .await?;

        Ok(Arc::new(SandboxDraftRequest {
            network: self.network.clone(),
            requester: self.requester.clone(),
            data,
        }))
    }
}

pub struct SandboxInvitedContributorLoc {
    network: SandboxNetwork,
    contributor: AccountId,
    data: LocData,
}

impl fmt::Debug for SandboxInvitedContributorLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SandboxInvitedContributorLoc")
            .field("id", &self.data.id)
            .field("contributor", &self.contributor)
            .finish()
    }
}

#[async_trait]
impl InvitedContributorLoc for SandboxInvitedContributorLoc {
    fn data(&self) -> &LocData {
        &self.data
    }

    async fn add_tokens_record(
        &self,
        signer: Arc<dyn Signer>,
        payload: TokensRecordPayload,
    ) -> Result<Arc<dyn InvitedContributorLoc>> {
        self.network
            .enter(SdkCall::AddTokensRecord {
                loc_id: self.data.id,
                record_id: payload.record_id,
                description: payload.description.clone(),
                file_names: payload.files.iter().map(|f| f.name.clone()).collect(),
            })
            .await?;

        let signature = signer
            .sign(&self.contributor, payload.record_id.as_bytes())
            .await?;
        if signature.signer != self.contributor {
            return Err(LogionError::authentication(
                "tokens record signed by another account",
            ));
        }
        keyring::verify(payload.record_id.as_bytes(), &signature)?;

        let mut files = Vec::with_capacity(payload.files.len());
        for file in &payload.files {
            let (hash, size) = read_payload(file).await?;
            files.push(TokensRecordFile {
                name: file.name.clone(),
                content_type: file.mime_type.to_string(),
                hash,
                size,
            });
        }

        let record = TokensRecord {
            id: payload.record_id,
            description: payload.description,
            files,
            issuer: self.contributor.clone(),
            added_on: Utc::now(),
        };
        let data = self
            .network
            .append_tokens_record(self.data.id, record)
            .await?;

        Ok(Arc::new(SandboxInvitedContributorLoc {
            network: self.network.clone(),
            contributor: self.contributor.clone(),
            data,
        }))
    }
}
