//! Sandbox keyring.
//!
//! Derives sr25519 key pairs from seed URIs and renders their public keys as
//! SS58 addresses (generic Substrate prefix). The mini secret key is the
//! SHA-256 digest of the URI, so the same seed always yields the same account.

use async_trait::async_trait;
use blake2::Blake2b512;
use logion_core::account::{AccountId, KeyPair, Keyring, Signature, SignatureScheme, Signer};
use logion_core::error::{LogionError, Result};
use schnorrkel::{ExpansionMode, Keypair, MiniSecretKey, PublicKey};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

const SIGNING_CONTEXT: &[u8] = b"substrate";
const SS58_PREFIX: u8 = 42;
const SS58_CHECKSUM_LEN: usize = 2;

#[derive(Default)]
pub struct SandboxKeyring {
    pairs: Arc<RwLock<HashMap<String, Keypair>>>,
}

impl SandboxKeyring {
    pub fn new() -> Self {
        Self::default()
    }

    fn derive(uri: &str) -> Result<Keypair> {
        let seed = Sha256::digest(uri.as_bytes());
        let mini = MiniSecretKey::from_bytes(&seed)
            .map_err(|e| LogionError::internal(format!("invalid mini secret key: {}", e)))?;
        Ok(mini.expand_to_keypair(ExpansionMode::Ed25519))
    }
}

impl Keyring for SandboxKeyring {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Sr25519
    }

    fn add_from_uri(&self, uri: &str) -> Result<KeyPair> {
        if uri.trim().is_empty() {
            return Err(LogionError::config("seed URI is empty"));
        }
        let pair = Self::derive(uri)?;
        let public_key = pair.public.to_bytes().to_vec();
        let address = ss58_encode(&public_key);
        self.pairs
            .write()
            .map_err(|e| LogionError::internal(format!("keyring lock poisoned: {}", e)))?
            .insert(address.clone(), pair);

        Ok(KeyPair {
            scheme: self.scheme(),
            public_key,
            address,
        })
    }

    fn signer(&self) -> Arc<dyn Signer> {
        Arc::new(SandboxSigner {
            pairs: self.pairs.clone(),
        })
    }
}

/// Signs with the pairs of the keyring it was obtained from, including pairs
/// added after it was created.
pub struct SandboxSigner {
    pairs: Arc<RwLock<HashMap<String, Keypair>>>,
}

impl std::fmt::Debug for SandboxSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.pairs.read().map(|p| p.len()).unwrap_or(0);
        f.debug_struct("SandboxSigner")
            .field("pairs", &count)
            .finish()
    }
}

#[async_trait]
impl Signer for SandboxSigner {
    async fn sign(&self, account: &AccountId, message: &[u8]) -> Result<Signature> {
        let pair = {
            let pairs = self
                .pairs
                .read()
                .map_err(|e| LogionError::internal(format!("keyring lock poisoned: {}", e)))?;
            pairs.get(&account.address).cloned().ok_or_else(|| {
                LogionError::authentication(format!("no key pair for account {}", account))
            })?
        };

        let context = schnorrkel::signing_context(SIGNING_CONTEXT);
        let bytes = pair.sign(context.bytes(message)).to_bytes().to_vec();

        Ok(Signature {
            signer: account.clone(),
            bytes,
        })
    }
}

/// Checks an sr25519 signature of `message` against the public key encoded in
/// the signer's SS58 address.
pub(crate) fn verify(message: &[u8], signature: &Signature) -> Result<()> {
    let invalid = |reason: String| {
        LogionError::authentication(format!(
            "invalid signature for {}: {}",
            signature.signer, reason
        ))
    };

    let public_key = ss58_decode(&signature.signer.address).map_err(|e| invalid(e.to_string()))?;
    let public_key = PublicKey::from_bytes(&public_key).map_err(|e| invalid(e.to_string()))?;
    let sig = schnorrkel::Signature::from_bytes(&signature.bytes).map_err(|e| invalid(e.to_string()))?;

    public_key
        .verify(schnorrkel::signing_context(SIGNING_CONTEXT).bytes(message), &sig)
        .map_err(|e| invalid(e.to_string()))
}

fn ss58_checksum(data: &[u8]) -> [u8; SS58_CHECKSUM_LEN] {
    let digest = Blake2b512::new()
        .chain_update(b"SS58PRE")
        .chain_update(data)
        .finalize();
    [digest[0], digest[1]]
}

fn ss58_encode(public_key: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + public_key.len() + SS58_CHECKSUM_LEN);
    data.push(SS58_PREFIX);
    data.extend_from_slice(public_key);
    let checksum = ss58_checksum(&data);
    data.extend_from_slice(&checksum);
    bs58::encode(data).into_string()
}

fn ss58_decode(address: &str) -> Result<Vec<u8>> {
    let data = bs58::decode(address)
        .into_vec()
        .map_err(|e| LogionError::invalid_input(format!("address is not base58: {}", e)))?;
    if data.len() != 1 + 32 + SS58_CHECKSUM_LEN || data[0] != SS58_PREFIX {
        return Err(LogionError::invalid_input(format!(
            "'{}' is not a generic SS58 address",
            address
        )));
    }
    let (body, checksum) = data.split_at(1 + 32);
    if ss58_checksum(body).as_slice() != checksum {
        return Err(LogionError::invalid_input(format!(
            "SS58 checksum mismatch for '{}'",
            address
        )));
    }
    Ok(body[1..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "bottom drive obey lake curtain smoke basket hold race lonely fit walk";
    const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    #[test]
    fn test_derivation_is_deterministic() {
        let a = SandboxKeyring::new().add_from_uri(SEED).unwrap();
        let b = SandboxKeyring::new().add_from_uri(SEED).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.scheme, SignatureScheme::Sr25519);
        assert_eq!(a.public_key.len(), 32);
        assert!(AccountId::polkadot(&a.address).is_ok());
    }

    #[test]
    fn test_address_is_generic_ss58() {
        let pair = SandboxKeyring::new().add_from_uri("//Alice").unwrap();

        assert!(pair.address.starts_with('5'));
        assert_eq!(ss58_decode(&pair.address).unwrap(), pair.public_key);
    }

    #[test]
    fn test_known_ss58_address_decodes() {
        // Well-known development account, encoded with prefix 42.
        let public_key = ss58_decode(ALICE).unwrap();
        assert_eq!(
            hex::encode(&public_key),
            "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d"
        );
        assert_eq!(ss58_encode(&public_key), ALICE);
    }

    #[test]
    fn test_corrupted_address_fails_checksum() {
        let mut corrupted = ALICE.to_string();
        corrupted.replace_range(11..12, "1");
        assert!(ss58_decode(&corrupted).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_different_seeds_yield_different_addresses() {
        let keyring = SandboxKeyring::new();
        let a = keyring.add_from_uri("//Alice").unwrap();
        let b = keyring.add_from_uri("//Bob").unwrap();
        assert_ne!(a.address, b.address);
    }

    #[test]
    fn test_empty_seed_is_rejected() {
        assert!(SandboxKeyring::new().add_from_uri("  ").unwrap_err().is_config());
    }

    #[tokio::test]
    async fn test_signature_verifies_against_address() {
        let keyring = SandboxKeyring::new();
        let signer = keyring.signer();
        let pair = keyring.add_from_uri("//Alice").unwrap();
        let account = AccountId::polkadot(&pair.address).unwrap();

        let signature = signer.sign(&account, b"challenge").await.unwrap();

        assert_eq!(signature.signer, account);
        assert_eq!(signature.bytes.len(), 64);
        assert!(verify(b"challenge", &signature).is_ok());
        assert!(verify(b"other message", &signature).unwrap_err().is_authentication());
    }

    #[tokio::test]
    async fn test_signature_from_another_key_is_rejected() {
        let keyring = SandboxKeyring::new();
        let signer = keyring.signer();
        let alice = keyring.add_from_uri("//Alice").unwrap();
        let bob = keyring.add_from_uri("//Bob").unwrap();

        let mut signature = signer
            .sign(&AccountId::polkadot(&alice.address).unwrap(), b"challenge")
            .await
            .unwrap();
        signature.signer = AccountId::polkadot(&bob.address).unwrap();

        assert!(verify(b"challenge", &signature).unwrap_err().is_authentication());
    }

    #[tokio::test]
    async fn test_signer_signs_only_known_accounts() {
        let signer = SandboxKeyring::new().signer();
        let stranger = AccountId::polkadot("5Stranger").unwrap();
        assert!(signer.sign(&stranger, b"challenge").await.unwrap_err().is_authentication());
    }
}
