pub mod config_service;
pub mod file_materializer;
pub mod paths;
pub mod sandbox;
pub mod storage;

pub use crate::config_service::{ConfigService, InitReport, LoadedConfig};
pub use crate::file_materializer::CacheFileMaterializer;
pub use crate::paths::LogionPaths;
pub use crate::sandbox::{SandboxClientFactory, SandboxKeyring, SandboxNetwork};
