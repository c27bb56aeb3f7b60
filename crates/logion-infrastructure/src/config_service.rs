//! Configuration service.
//!
//! Reads `config.toml` and `secret.json` once at startup and assembles the
//! `SessionSettings` the bootstrapper consumes.

use crate::paths::LogionPaths;
use crate::storage::{ConfigStorage, ConfigStorageError, SecretStorage, SecretStorageError};
use logion_core::config::{DemoConfig, SecretConfig, SessionSettings};
use logion_core::error::{LogionError, Result};
use std::path::PathBuf;

/// Files created by [`ConfigService::init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub config_path: PathBuf,
    pub config_created: bool,
    pub secret_path: PathBuf,
    pub secret_created: bool,
}

/// Configuration loaded at startup.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DemoConfig,
    pub settings: SessionSettings,
}

pub struct ConfigService {
    config_storage: ConfigStorage,
    secret_storage: SecretStorage,
}

impl ConfigService {
    /// Creates a service for the default locations, with optional overrides
    /// for each file.
    pub fn new(
        paths: &LogionPaths,
        config_path: Option<PathBuf>,
        secret_path: Option<PathBuf>,
    ) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => paths
                .config_file()
                .map_err(|e| LogionError::config(e.to_string()))?,
        };
        let secret_path = match secret_path {
            Some(path) => path,
            None => paths
                .secret_file()
                .map_err(|e| LogionError::config(e.to_string()))?,
        };
        Ok(Self {
            config_storage: ConfigStorage::new(config_path),
            secret_storage: SecretStorage::with_path(secret_path),
        })
    }

    /// Loads and validates both files.
    pub fn load(&self) -> Result<LoadedConfig> {
        let config = self.load_config()?;
        let secret = self.load_secret()?;
        let settings = SessionSettings::from_parts(&config, &secret)?;

        tracing::info!(
            "[Config] Loaded config from {} (env: {}, explicit client: {})",
            self.config_storage.path().display(),
            settings.env,
            settings.client.is_some()
        );

        Ok(LoadedConfig { config, settings })
    }

    pub fn load_config(&self) -> Result<DemoConfig> {
        self.config_storage.load().map_err(|e| match e {
            ConfigStorageError::NotFound(path) => LogionError::config(format!(
                "config file not found at {} (run `logion-demo init`)",
                path.display()
            )),
            ConfigStorageError::IoError(e) => e.into(),
            ConfigStorageError::TomlParseError(e) => e.into(),
            ConfigStorageError::TomlSerError(e) => e.into(),
        })
    }

    fn load_secret(&self) -> Result<SecretConfig> {
        self.secret_storage.load().map_err(|e| match e {
            SecretStorageError::NotFound(path) => LogionError::config(format!(
                "secret file not found at {} (run `logion-demo init`)",
                path.display()
            )),
            SecretStorageError::IoError(e) => e.into(),
            SecretStorageError::ParseError(e) => e.into(),
        })
    }

    /// Writes template files where none exist. Existing files are left untouched.
    pub fn init(&self) -> Result<InitReport> {
        let config_created = if self.config_storage.exists() {
            false
        } else {
            self.config_storage
                .save(&DemoConfig::template())
                .map_err(|e| LogionError::io(e.to_string()))?;
            true
        };

        let secret_created = self
            .secret_storage
            .ensure_template()
            .map_err(|e| LogionError::io(e.to_string()))?;

        tracing::info!(
            "[Config] init: config created={}, secret created={}",
            config_created,
            secret_created
        );

        Ok(InitReport {
            config_path: self.config_storage.path().clone(),
            config_created,
            secret_path: self.secret_storage.path().clone(),
            secret_created,
        })
    }
}
