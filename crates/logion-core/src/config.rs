use crate::account::AccountId;
use crate::error::{LogionError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_ENV: &str = "DEV";

/// Explicit client configuration. When present it takes precedence over the
/// network environment identifier.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub directory_endpoint: String,
    #[serde(default)]
    pub rpc_endpoints: Vec<String>,
}

/// Records the sandbox network is seeded with for the session account.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SandboxFixture {
    /// Owners (legal officers) of closed identity LOCs requested by the account.
    #[serde(default)]
    pub identity_loc_owners: Vec<String>,
    /// Number of files already attached to a draft collection request.
    /// `None` means the account has no draft collection.
    #[serde(default)]
    pub draft_collection_files: Option<usize>,
    /// Number of tokens records already attached to the invited collection.
    /// `None` means the configured collection does not exist.
    #[serde(default)]
    pub invited_collection_tokens_records: Option<usize>,
}

/// Plain (non-secret) configuration, read once at startup from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    #[serde(default = "default_env")]
    pub env: String,
    /// Address of the counterparty legal officer.
    pub legal_officer: String,
    /// Target collection LOC id, UUID or decimal form.
    #[serde(default)]
    pub collection_loc_id: String,
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub client: Option<ClientConfig>,
    #[serde(default)]
    pub sandbox: Option<SandboxFixture>,
}

fn default_env() -> String {
    DEFAULT_ENV.to_string()
}

impl DemoConfig {
    /// Template written by `logion-demo init`.
    pub fn template() -> Self {
        let legal_officer = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".to_string();
        Self {
            env: default_env(),
            legal_officer: legal_officer.clone(),
            collection_loc_id: "d61e2e12-6c06-4425-aeee-2a0e969ac14e".to_string(),
            cache_dir: None,
            client: None,
            sandbox: Some(SandboxFixture {
                identity_loc_owners: vec![legal_officer],
                draft_collection_files: Some(2),
                invited_collection_tokens_records: Some(5),
            }),
        }
    }

    /// Parses the legal officer address.
    pub fn legal_officer_account(&self) -> Result<AccountId> {
        AccountId::polkadot(&self.legal_officer)
            .map_err(|e| LogionError::config(format!("legal_officer: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.env.trim().is_empty() && self.client.is_none() {
            return Err(LogionError::config(
                "either `env` or a [client] section is required",
            ));
        }
        if let Some(client) = &self.client {
            if client.directory_endpoint.trim().is_empty() {
                return Err(LogionError::config("client.directory_endpoint is empty"));
            }
        }
        self.legal_officer_account()?;
        Ok(())
    }
}

/// Secret configuration, read from `secret.json`.
///
/// The seed phrase must never be logged or echoed in error messages.
#[derive(Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default)]
    pub user_seed: String,
}

impl std::fmt::Debug for SecretConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretConfig")
            .field("user_seed", &"<redacted>")
            .finish()
    }
}

impl SecretConfig {
    pub fn validate(&self) -> Result<()> {
        if self.user_seed.trim().is_empty() {
            return Err(LogionError::config("user_seed is missing in secret.json"));
        }
        Ok(())
    }
}

/// Everything `connect` needs, assembled by the configuration service.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub env: String,
    pub client: Option<ClientConfig>,
    pub user_seed: SecretConfig,
    pub legal_officer: AccountId,
    pub collection_loc_id: String,
}

impl SessionSettings {
    pub fn from_parts(config: &DemoConfig, secret: &SecretConfig) -> Result<Self> {
        config.validate()?;
        secret.validate()?;
        Ok(Self {
            env: config.env.clone(),
            client: config.client.clone(),
            user_seed: secret.clone(),
            legal_officer: config.legal_officer_account()?,
            collection_loc_id: config.collection_loc_id.clone(),
        })
    }

    pub fn seed(&self) -> &str {
        &self.user_seed.user_seed
    }
}
