//! Collection LOC mutations.
//!
//! - `draft_mutator`: adds a file to the draft collection request
//! - `tokens_record_mutator`: adds a tokens record to the invited collection

mod draft_mutator;
mod tokens_record_mutator;

pub use draft_mutator::DraftCollectionMutator;
pub use tokens_record_mutator::TokensRecordMutator;

use logion_core::error::Result;
use logion_core::loc::{AuthenticatedClient, LocId};

/// Reads the authoritative tokens-record count of a collection through the
/// public read path. A missing answer counts as zero.
pub(crate) async fn count_tokens_records(
    client: &dyn AuthenticatedClient,
    loc_id: LocId,
) -> Result<usize> {
    let token = client.token();
    let records = client.get_tokens_records(loc_id, token.as_ref()).await?;
    Ok(records.map(|records| records.len()).unwrap_or(0))
}
