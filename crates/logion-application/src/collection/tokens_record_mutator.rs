use super::count_tokens_records;
use logion_core::discovery::Discovery;
use logion_core::error::Result;
use logion_core::file::FileMaterializer;
use logion_core::hash::Hash;
use logion_core::loc::TokensRecordPayload;
use logion_core::session::{InvitedContributorView, SessionState};
use std::sync::Arc;

/// Adds a demo tokens record to the invited-contributor collection.
pub struct TokensRecordMutator {
    materializer: Arc<dyn FileMaterializer>,
}

impl TokensRecordMutator {
    pub fn new(materializer: Arc<dyn FileMaterializer>) -> Self {
        Self { materializer }
    }

    /// Whether `add_tokens_record` has anything to do on `state`.
    pub fn can_add_tokens_record(state: &SessionState) -> bool {
        state.is_connected() && state.invited_contributor.is_present()
    }

    /// Submits `Record #N` (N = known record count) with one demo file,
    /// signed by the session signer.
    ///
    /// The count stored in the returned state comes from a fresh read after
    /// submission, not from `N + 1`: other contributors may have added
    /// records in the meantime. Without a session or an invited collection
    /// this is a no-op.
    pub async fn add_tokens_record(&self, state: &SessionState) -> Result<SessionState> {
        let (Some(session), Some(view)) =
            (state.session.as_ref(), state.invited_contributor.present())
        else {
            tracing::debug!("[AddTokensRecord] No session or invited collection, nothing to do");
            return Ok(state.clone());
        };

        let index = view.tokens_records;
        let file = self.materializer.prepare_file(index).await?;
        let label = format!("Record #{}", index);
        let payload = TokensRecordPayload {
            record_id: Hash::of(&label),
            description: format!("This is the Tokens Record #{}", index),
            files: vec![file],
        };

        let loc_id = view.loc.data().id;
        tracing::info!(
            "[AddTokensRecord] Adding '{}' ({}) to collection {}",
            label,
            payload.record_id,
            loc_id
        );

        let updated = view
            .loc
            .add_tokens_record(session.signer.clone(), payload)
            .await?;
        let tokens_records = count_tokens_records(session.client.as_ref(), loc_id).await?;

        tracing::info!(
            "[AddTokensRecord] Collection {} now has {} tokens record(s)",
            loc_id,
            tokens_records
        );

        let mut next = state.clone();
        next.invited_contributor = Discovery::Present(InvitedContributorView {
            loc: updated,
            tokens_records,
        });
        Ok(next)
    }
}
