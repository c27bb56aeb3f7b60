//! Seeds a sandbox network from the `[sandbox]` configuration section.

use super::network::{SandboxNetwork, new_loc, new_tokens_record};
use chrono::Utc;
use logion_core::account::AccountId;
use logion_core::config::SandboxFixture;
use logion_core::error::{LogionError, Result};
use logion_core::hash::Hash;
use logion_core::loc::{LocFile, LocId, LocKind, LocStatus};

/// Accounts the fixture is laid out for.
#[derive(Debug, Clone)]
pub struct FixtureAccounts {
    /// The account `connect` will authenticate as.
    pub requester: AccountId,
    pub legal_officer: AccountId,
    /// Requester of the invited collection; someone other than `requester`.
    pub collection_owner: AccountId,
}

/// What was created, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub identity_locs: Vec<LocId>,
    pub draft_collection: Option<LocId>,
    pub invited_collection: Option<LocId>,
}

impl SandboxNetwork {
    /// Creates the records described by `fixture`.
    ///
    /// The invited collection is created under `collection_loc_id` when that
    /// id parses; otherwise it is skipped, matching what `connect` would see.
    pub async fn seed(
        &self,
        fixture: &SandboxFixture,
        accounts: &FixtureAccounts,
        collection_loc_id: &str,
    ) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        for owner in &fixture.identity_loc_owners {
            let owner = AccountId::polkadot(owner)
                .map_err(|e| LogionError::config(format!("sandbox.identity_loc_owners: {}", e)))?;
            let loc = new_loc(
                LocKind::Identity,
                LocStatus::Closed,
                owner,
                Some(accounts.requester.clone()),
            );
            report.identity_locs.push(loc.id);
            self.insert_loc(loc).await;
        }

        if let Some(files) = fixture.draft_collection_files {
            let mut loc = new_loc(
                LocKind::Collection,
                LocStatus::Draft,
                accounts.legal_officer.clone(),
                Some(accounts.requester.clone()),
            );
            loc.files = (0..files)
                .map(|i| LocFile {
                    name: format!("seed{}.txt", i),
                    hash: Hash::of(&format!("seed{}", i)),
                    nature: format!("Seed {}", i),
                    size: format!("seed{}", i).len() as u64,
                    submitter: accounts.requester.clone(),
                    added_on: Utc::now(),
                })
                .collect();
            report.draft_collection = Some(loc.id);
            self.insert_loc(loc).await;
        }

        let collection_id = LocId::from_any_string(collection_loc_id);
        if let (Some(records), Some(loc_id)) =
            (fixture.invited_collection_tokens_records, collection_id)
        {
            let mut loc = new_loc(
                LocKind::Collection,
                LocStatus::Closed,
                accounts.legal_officer.clone(),
                Some(accounts.collection_owner.clone()),
            );
            loc.id = loc_id;
            self.insert_loc(loc).await;
            self.invite_contributor(loc_id, accounts.requester.clone())
                .await;
            for i in 0..records {
                let record =
                    new_tokens_record(&format!("Seed #{}", i), accounts.collection_owner.clone());
                self.insert_tokens_record(loc_id, record).await;
            }
            report.invited_collection = Some(loc_id);
        }

        tracing::info!(
            "[Sandbox] Seeded {} identity LOC(s), draft collection: {}, invited collection: {}",
            report.identity_locs.len(),
            report.draft_collection.is_some(),
            report.invited_collection.is_some()
        );

        Ok(report)
    }
}
