//! In-process sandbox network.
//!
//! Implements the client SDK and keyring ports against an in-memory ledger so
//! the demo runs without a live network. The module structure:
//!
//! - `network`: ledger, call log, fault injection and latency controls
//! - `client`: `ClientFactory`, clients and record views
//! - `keyring`: deterministic sr25519 keyring and signer
//! - `fixture`: seeding from the `[sandbox]` config section

mod client;
mod fixture;
mod keyring;
mod network;

pub use client::{
    SandboxAuthenticatedClient, SandboxClient, SandboxClientFactory, SandboxDraftRequest,
    SandboxInvitedContributorLoc,
};
pub use fixture::{FixtureAccounts, SeedReport};
pub use keyring::{SandboxKeyring, SandboxSigner};
pub use network::{
    KNOWN_ENVIRONMENTS, SandboxNetwork, SdkCall, SdkOperation, new_loc, new_tokens_record,
};
