use super::*;
use logion_core::account::Keyring;
use logion_core::config::{ClientConfig, SandboxFixture, SecretConfig};
use logion_core::loc::LocStatus;
use logion_infrastructure::sandbox::{
    FixtureAccounts, SandboxClientFactory, SandboxKeyring, SandboxNetwork, SdkCall, SdkOperation,
    new_loc,
};

const SEED: &str = "//Alice";
const OFFICER: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
const COLLECTION: &str = "d61e2e12-6c06-4425-aeee-2a0e969ac14e";

fn requester() -> AccountId {
    let pair = SandboxKeyring::new().add_from_uri(SEED).unwrap();
    AccountId::polkadot(&pair.address).unwrap()
}

fn officer() -> AccountId {
    AccountId::polkadot(OFFICER).unwrap()
}

fn accounts() -> FixtureAccounts {
    FixtureAccounts {
        requester: requester(),
        legal_officer: officer(),
        collection_owner: AccountId::polkadot("5CollectionOwner").unwrap(),
    }
}

fn settings(collection_loc_id: &str) -> SessionSettings {
    SessionSettings {
        env: "DEV".to_string(),
        client: None,
        user_seed: SecretConfig {
            user_seed: SEED.to_string(),
        },
        legal_officer: officer(),
        collection_loc_id: collection_loc_id.to_string(),
    }
}

fn bootstrapper(network: &SandboxNetwork, settings: SessionSettings) -> SessionBootstrapper {
    SessionBootstrapper::new(
        Arc::new(SandboxClientFactory::new(network.clone())),
        Arc::new(SandboxKeyring::new()),
        settings,
    )
}

async fn seeded(fixture: SandboxFixture) -> SandboxNetwork {
    let network = SandboxNetwork::new();
    network.seed(&fixture, &accounts(), COLLECTION).await.unwrap();
    network.clear_calls();
    network
}

fn full_fixture() -> SandboxFixture {
    SandboxFixture {
        identity_loc_owners: vec![OFFICER.to_string()],
        draft_collection_files: Some(2),
        invited_collection_tokens_records: Some(5),
    }
}

#[tokio::test]
async fn test_connect_discovers_everything() {
    let network = seeded(full_fixture()).await;
    let bootstrapper = bootstrapper(&network, settings(COLLECTION));

    let state = bootstrapper.connect(&SessionState::default()).await.unwrap();

    assert!(state.is_connected());
    assert_eq!(state.account(), Some(&requester()));
    assert_eq!(state.identity_loc.present().unwrap().owner, officer());
    assert_eq!(state.draft_file_count(), Some(2));
    assert_eq!(state.tokens_record_count(), Some(5));
    assert_eq!(
        state.invited_contributor.present().unwrap().loc.data().id,
        LocId::from_any_string(COLLECTION).unwrap()
    );
}

#[tokio::test]
async fn test_connect_calls_sdk_in_order() {
    let network = seeded(full_fixture()).await;
    let bootstrapper = bootstrapper(&network, settings(COLLECTION));

    bootstrapper.connect(&SessionState::default()).await.unwrap();

    let operations: Vec<SdkOperation> = network.calls().iter().map(|c| c.operation()).collect();
    assert_eq!(
        operations,
        vec![
            SdkOperation::CreateClient,
            SdkOperation::Authenticate,
            SdkOperation::LocsState,
            SdkOperation::FindInvitedContributorLoc,
            SdkOperation::GetTokensRecords,
        ]
    );
    assert!(network.calls().contains(&SdkCall::GetTokensRecords {
        loc_id: LocId::from_any_string(COLLECTION).unwrap(),
        with_token: true,
    }));
}

#[tokio::test]
async fn test_connect_twice_makes_no_new_calls() {
    let network = seeded(full_fixture()).await;
    let bootstrapper = bootstrapper(&network, settings(COLLECTION));

    let first = bootstrapper.connect(&SessionState::default()).await.unwrap();
    let calls = network.calls().len();

    let second = bootstrapper.connect(&first).await.unwrap();

    assert_eq!(network.calls().len(), calls);
    assert_eq!(second.account(), first.account());
    assert_eq!(second.tokens_record_count(), first.tokens_record_count());
}

#[tokio::test]
async fn test_identity_loc_of_other_officer_is_absent() {
    let network = seeded(SandboxFixture {
        identity_loc_owners: vec!["5SomeOtherOfficer".to_string()],
        ..full_fixture()
    })
    .await;

    let state = bootstrapper(&network, settings(COLLECTION))
        .connect(&SessionState::default())
        .await
        .unwrap();

    assert!(state.identity_loc.is_absent());
}

#[tokio::test]
async fn test_open_identity_loc_is_not_retained() {
    let network = seeded(SandboxFixture {
        identity_loc_owners: Vec::new(),
        ..full_fixture()
    })
    .await;
    network
        .insert_loc(new_loc(
            LocKind::Identity,
            LocStatus::Open,
            officer(),
            Some(requester()),
        ))
        .await;

    let state = bootstrapper(&network, settings(COLLECTION))
        .connect(&SessionState::default())
        .await
        .unwrap();

    assert!(state.identity_loc.is_absent());
}

#[tokio::test]
async fn test_first_draft_collection_is_retained() {
    let network = seeded(SandboxFixture {
        draft_collection_files: Some(1),
        ..SandboxFixture::default()
    })
    .await;
    let second = new_loc(
        LocKind::Collection,
        LocStatus::Draft,
        officer(),
        Some(requester()),
    );
    network.insert_loc(second.clone()).await;

    let state = bootstrapper(&network, settings(COLLECTION))
        .connect(&SessionState::default())
        .await
        .unwrap();

    let draft = state.draft_collection.present().unwrap();
    assert_ne!(draft.data().id, second.id);
    assert_eq!(draft.data().files.len(), 1);
}

#[tokio::test]
async fn test_no_records_yields_absent_everywhere() {
    let network = seeded(SandboxFixture::default()).await;

    let state = bootstrapper(&network, settings(COLLECTION))
        .connect(&SessionState::default())
        .await
        .unwrap();

    assert!(state.is_connected());
    assert!(state.identity_loc.is_absent());
    assert!(state.draft_collection.is_absent());
    assert!(state.invited_contributor.is_absent());
}

#[tokio::test]
async fn test_unparseable_collection_id_skips_lookup() {
    let network = seeded(full_fixture()).await;

    let state = bootstrapper(&network, settings("not-a-loc-id"))
        .connect(&SessionState::default())
        .await
        .unwrap();

    assert!(state.invited_contributor.is_absent());
    assert!(
        !network
            .calls()
            .iter()
            .any(|c| c.operation() == SdkOperation::FindInvitedContributorLoc)
    );
}

#[tokio::test]
async fn test_decimal_collection_id_is_accepted() {
    let network = seeded(full_fixture()).await;
    let decimal = LocId::from_any_string(COLLECTION).unwrap().to_decimal_string();

    let state = bootstrapper(&network, settings(&decimal))
        .connect(&SessionState::default())
        .await
        .unwrap();

    assert_eq!(state.tokens_record_count(), Some(5));
}

#[tokio::test]
async fn test_authentication_rejection_leaves_state_unchanged() {
    let network = seeded(full_fixture()).await;
    network.reject_authentication(requester());

    let initial = SessionState::default();
    let err = bootstrapper(&network, settings(COLLECTION))
        .connect(&initial)
        .await
        .unwrap_err();

    assert!(err.is_authentication());
    assert!(!initial.is_connected());
    assert!(initial.identity_loc.is_unknown());
    assert!(
        !network
            .calls()
            .iter()
            .any(|c| c.operation() == SdkOperation::LocsState)
    );
}

#[tokio::test]
async fn test_failed_discovery_can_be_retried() {
    let network = seeded(full_fixture()).await;
    network.fail_next(SdkOperation::LocsState);
    let bootstrapper = bootstrapper(&network, settings(COLLECTION));

    let err = bootstrapper.connect(&SessionState::default()).await.unwrap_err();
    assert!(err.is_network());

    let state = bootstrapper.connect(&SessionState::default()).await.unwrap();
    assert!(state.is_connected());
    assert_eq!(state.draft_file_count(), Some(2));
}

#[tokio::test]
async fn test_client_config_takes_precedence_over_env() {
    let network = seeded(full_fixture()).await;
    let mut settings = settings(COLLECTION);
    settings.env = "NOWHERE".to_string();
    settings.client = Some(ClientConfig {
        directory_endpoint: "https://directory.example".to_string(),
        rpc_endpoints: vec!["wss://rpc.example".to_string()],
    });

    bootstrapper(&network, settings)
        .connect(&SessionState::default())
        .await
        .unwrap();

    assert_eq!(
        network.calls()[0],
        SdkCall::CreateClient {
            target: "https://directory.example".to_string()
        }
    );
}

#[tokio::test]
async fn test_unknown_env_is_a_config_error() {
    let network = seeded(full_fixture()).await;
    let mut settings = settings(COLLECTION);
    settings.env = "NOWHERE".to_string();

    let err = bootstrapper(&network, settings)
        .connect(&SessionState::default())
        .await
        .unwrap_err();

    assert!(err.is_config());
}
