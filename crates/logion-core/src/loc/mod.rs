//! LOC domain module.
//!
//! - `model`: LOC ids, snapshots, files and tokens records
//! - `client`: the client SDK ports

mod client;
mod model;

pub use client::{
    AccessToken, AddFileParams, AuthenticatedClient, ClientFactory, DraftRequest,
    InvitedContributorLoc, LocsState, LogionClient, TokensRecordPayload,
};
pub use model::{LocData, LocFile, LocId, LocKind, LocStatus, TokensRecord, TokensRecordFile};
