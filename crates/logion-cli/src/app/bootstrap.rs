use std::sync::Arc;

use anyhow::{Context, Result};
use logion_application::{
    DemoUseCase, DraftCollectionMutator, SessionBootstrapper, TokensRecordMutator,
};
use logion_core::account::{AccountId, Keyring};
use logion_core::config::SessionSettings;
use logion_infrastructure::sandbox::{FixtureAccounts, SeedReport};
use logion_infrastructure::{
    CacheFileMaterializer, LoadedConfig, LogionPaths, SandboxClientFactory, SandboxKeyring,
    SandboxNetwork,
};

/// Seed URI of the account that requested the invited collection.
const COLLECTION_OWNER_URI: &str = "//CollectionOwner";

/// Wires the demo use case against a seeded sandbox network.
pub struct AppBootstrap {
    pub usecase: DemoUseCase,
    pub network: SandboxNetwork,
    pub seed_report: SeedReport,
}

impl AppBootstrap {
    pub async fn build(paths: &LogionPaths, loaded: LoadedConfig) -> Result<Self> {
        let LoadedConfig { config, settings } = loaded;

        let network = SandboxNetwork::new();
        let fixture = config.sandbox.clone().unwrap_or_default();
        let accounts = fixture_accounts(&settings)?;
        let seed_report = network
            .seed(&fixture, &accounts, &settings.collection_loc_id)
            .await?;

        let cache_dir = match &config.cache_dir {
            Some(dir) => dir.clone(),
            None => paths
                .cache_dir()
                .context("Failed to resolve cache directory")?,
        };
        tracing::info!("[Bootstrap] Demo files go to {}", cache_dir.display());

        let materializer = Arc::new(CacheFileMaterializer::new(cache_dir));
        let usecase = DemoUseCase::new(
            SessionBootstrapper::new(
                Arc::new(SandboxClientFactory::new(network.clone())),
                Arc::new(SandboxKeyring::new()),
                settings,
            ),
            DraftCollectionMutator::new(materializer.clone()),
            TokensRecordMutator::new(materializer),
        );

        Ok(Self {
            usecase,
            network,
            seed_report,
        })
    }
}

/// Derives the fixture accounts with a keyring of their own, so the session
/// keyring only ever holds the user's pair.
fn fixture_accounts(settings: &SessionSettings) -> Result<FixtureAccounts> {
    let keyring = SandboxKeyring::new();
    let requester = AccountId::polkadot(&keyring.add_from_uri(settings.seed())?.address)?;
    let collection_owner =
        AccountId::polkadot(&keyring.add_from_uri(COLLECTION_OWNER_URI)?.address)?;

    Ok(FixtureAccounts {
        requester,
        legal_officer: settings.legal_officer.clone(),
        collection_owner,
    })
}
