use logion_core::discovery::Discovery;
use logion_core::error::Result;
use logion_core::file::FileMaterializer;
use logion_core::loc::AddFileParams;
use logion_core::session::SessionState;
use std::sync::Arc;

/// Appends a demo file to the draft collection request.
pub struct DraftCollectionMutator {
    materializer: Arc<dyn FileMaterializer>,
}

impl DraftCollectionMutator {
    pub fn new(materializer: Arc<dyn FileMaterializer>) -> Self {
        Self { materializer }
    }

    /// Whether `add_file` has anything to do on `state`.
    pub fn can_add_file(state: &SessionState) -> bool {
        state.draft_collection.is_present()
    }

    /// Adds `file<N>.txt` with nature `Test <N>`, `N` being the current file
    /// count, and returns the state holding the SDK's updated view.
    ///
    /// Without a draft collection this is a no-op returning `state` unchanged.
    pub async fn add_file(&self, state: &SessionState) -> Result<SessionState> {
        let Some(draft) = state.draft_collection.present() else {
            tracing::debug!("[AddFile] No draft collection, nothing to do");
            return Ok(state.clone());
        };

        let index = draft.data().files.len();
        let file = self.materializer.prepare_file(index).await?;
        let nature = format!("Test {}", index);

        tracing::info!(
            "[AddFile] Adding {} to draft collection {}",
            file.name,
            draft.data().id
        );

        let updated = draft.add_file(AddFileParams { file, nature }).await?;

        tracing::info!(
            "[AddFile] Draft collection {} now has {} file(s)",
            updated.data().id,
            updated.data().files.len()
        );

        let mut next = state.clone();
        next.draft_collection = Discovery::Present(updated);
        Ok(next)
    }
}
