use super::model::FilePayload;
use crate::error::Result;
use async_trait::async_trait;

/// Name of the demo file generated for `index`.
pub fn demo_file_name(index: usize) -> String {
    format!("file{}.txt", index)
}

/// Text content of the demo file generated for `index`.
pub fn demo_file_content(index: usize) -> String {
    format!("test{}", index)
}

/// Writes demo files to a transient location and wraps them as payloads.
///
/// Implementations must not contact the network: a failure here has to abort
/// the calling action before any record is touched.
#[async_trait]
pub trait FileMaterializer: Send + Sync {
    /// Writes `file<index>.txt` containing `test<index>` and returns a
    /// `text/plain` payload pointing at it.
    async fn prepare_file(&self, index: usize) -> Result<FilePayload>;
}
