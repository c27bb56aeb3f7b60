//! Cache-directory file materializer.

use async_trait::async_trait;
use logion_core::error::Result;
use logion_core::file::{
    FileMaterializer, FilePayload, MimeType, demo_file_content, demo_file_name,
};
use std::path::{Path, PathBuf};

/// Writes demo files into a transient cache directory.
///
/// The directory is created on first use. Files with the same index are
/// overwritten, so the directory never holds more than one copy per index.
#[derive(Debug, Clone)]
pub struct CacheFileMaterializer {
    cache_dir: PathBuf,
}

impl CacheFileMaterializer {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

#[async_trait]
impl FileMaterializer for CacheFileMaterializer {
    async fn prepare_file(&self, index: usize) -> Result<FilePayload> {
        let file_name = demo_file_name(index);
        let path = self.cache_dir.join(&file_name);

        tokio::fs::create_dir_all(&self.cache_dir).await?;
        tokio::fs::write(&path, demo_file_content(index)).await?;

        tracing::debug!("[FileMaterializer] Wrote {}", path.display());

        Ok(FilePayload::new(path, file_name, MimeType::text_plain()))
    }
}
