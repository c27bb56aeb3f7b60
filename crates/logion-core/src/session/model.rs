use crate::account::{AccountId, Signer};
use crate::discovery::Discovery;
use crate::loc::{AuthenticatedClient, DraftRequest, InvitedContributorLoc, LocData};
use std::fmt;
use std::sync::Arc;

/// An authenticated wallet identity paired with a live client.
#[derive(Clone)]
pub struct Session {
    pub account: AccountId,
    pub signer: Arc<dyn Signer>,
    pub client: Arc<dyn AuthenticatedClient>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

/// The invited-contributor collection together with its known record count.
#[derive(Debug, Clone)]
pub struct InvitedContributorView {
    pub loc: Arc<dyn InvitedContributorLoc>,
    pub tokens_records: usize,
}

/// Everything the demo knows about the current session.
///
/// Actions never mutate a state in place: they take a reference and return
/// the next state, which the caller commits only on success.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub session: Option<Session>,
    pub identity_loc: Discovery<LocData>,
    pub draft_collection: Discovery<Arc<dyn DraftRequest>>,
    pub invited_contributor: Discovery<InvitedContributorView>,
}

impl SessionState {
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn account(&self) -> Option<&AccountId> {
        self.session.as_ref().map(|s| &s.account)
    }

    /// Number of files on the draft collection, if one was discovered.
    pub fn draft_file_count(&self) -> Option<usize> {
        self.draft_collection.present().map(|d| d.data().files.len())
    }

    /// Known tokens-record count of the invited collection, if discovered.
    pub fn tokens_record_count(&self) -> Option<usize> {
        self.invited_contributor.present().map(|v| v.tokens_records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_disconnected_and_unknown() {
        let state = SessionState::default();
        assert!(!state.is_connected());
        assert!(state.identity_loc.is_unknown());
        assert!(state.draft_collection.is_unknown());
        assert!(state.invited_contributor.is_unknown());
        assert_eq!(state.draft_file_count(), None);
        assert_eq!(state.tokens_record_count(), None);
    }
}
