//! Session bootstrap workflow.

use crate::collection::count_tokens_records;
use logion_core::account::{AccountId, Keyring};
use logion_core::config::SessionSettings;
use logion_core::discovery::Discovery;
use logion_core::error::Result;
use logion_core::loc::{AuthenticatedClient, ClientFactory, LocData, LocId, LocKind, LogionClient};
use logion_core::session::{InvitedContributorView, Session, SessionState};
use std::sync::Arc;

/// Establishes the authenticated session and discovers its records.
pub struct SessionBootstrapper {
    client_factory: Arc<dyn ClientFactory>,
    keyring: Arc<dyn Keyring>,
    settings: SessionSettings,
}

impl SessionBootstrapper {
    pub fn new(
        client_factory: Arc<dyn ClientFactory>,
        keyring: Arc<dyn Keyring>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            client_factory,
            keyring,
            settings,
        }
    }

    /// Connects and discovers the identity LOC, the draft collection and the
    /// invited-contributor collection.
    ///
    /// Returns `state` unchanged, without any SDK call, when a session already
    /// exists. The next state is only returned once every step succeeded; on
    /// error the caller keeps its current state and may simply retry.
    pub async fn connect(&self, state: &SessionState) -> Result<SessionState> {
        if state.is_connected() {
            tracing::debug!("[Bootstrap] Session already established, skipping connect");
            return Ok(state.clone());
        }

        let client = self.create_client().await?;

        let pair = self.keyring.add_from_uri(self.settings.seed())?;
        let signer = self.keyring.signer();
        let account = AccountId::polkadot(&pair.address)?;
        tracing::info!("[Bootstrap] Derived account {}", account.address);

        let client = client.with_current_account(&account);
        let authenticated = client
            .authenticate(std::slice::from_ref(&account), signer.clone())
            .await?;
        tracing::info!("[Bootstrap] Authenticated {}", account.address);

        let locs_state = authenticated.locs_state().await?;

        let identity_loc = Discovery::from_option(
            locs_state
                .closed(LocKind::Identity)
                .iter()
                .find(|loc| loc.owner == self.settings.legal_officer)
                .cloned(),
        );
        let draft_collection =
            Discovery::from_option(locs_state.drafts(LocKind::Collection).first().cloned());
        let invited_contributor = self.discover_invited_contributor(&authenticated).await?;

        tracing::info!(
            "[Bootstrap] Discovery done: identity LOC: {}, draft collection: {}, invited collection: {}",
            describe(&identity_loc.as_ref().map(|loc: &LocData| loc.id)),
            describe(&draft_collection.as_ref().map(|draft| draft.data().id)),
            describe(&invited_contributor.as_ref().map(|view| view.loc.data().id)),
        );

        Ok(SessionState {
            session: Some(Session {
                account,
                signer,
                client: authenticated,
            }),
            identity_loc,
            draft_collection,
            invited_contributor,
        })
    }

    async fn create_client(&self) -> Result<Arc<dyn LogionClient>> {
        match &self.settings.client {
            Some(config) => {
                tracing::info!(
                    "[Bootstrap] Creating client for {}",
                    config.directory_endpoint
                );
                self.client_factory.create_with_config(config).await
            }
            None => {
                tracing::info!("[Bootstrap] Creating client for env {}", self.settings.env);
                self.client_factory.create_for_env(&self.settings.env).await
            }
        }
    }

    async fn discover_invited_contributor(
        &self,
        client: &Arc<dyn AuthenticatedClient>,
    ) -> Result<Discovery<InvitedContributorView>> {
        let Some(loc_id) = LocId::from_any_string(&self.settings.collection_loc_id) else {
            tracing::info!(
                "[Bootstrap] Collection LOC id '{}' is not a valid id, skipping lookup",
                self.settings.collection_loc_id
            );
            return Ok(Discovery::Absent);
        };

        let Some(loc) = client.find_invited_contributor_loc(loc_id).await? else {
            return Ok(Discovery::Absent);
        };
        let tokens_records = count_tokens_records(client.as_ref(), loc_id).await?;

        Ok(Discovery::Present(InvitedContributorView {
            loc,
            tokens_records,
        }))
    }
}

fn describe(discovery: &Discovery<LocId>) -> String {
    match discovery {
        Discovery::Unknown => "unknown".to_string(),
        Discovery::Absent => "none".to_string(),
        Discovery::Present(id) => id.to_string(),
    }
}

#[cfg(test)]
#[path = "bootstrapper_test.rs"]
mod tests;
