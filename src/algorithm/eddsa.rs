//! EdDSA over Ed25519
//!
//! The signing input is passed to Ed25519 as-is; no prehash.

use crate::algorithm::{Algorithm, TokenSigner, TokenVerifier};
use crate::error::{Error, Result};
use crate::keys::{Ed25519Private, Ed25519PrivateKey, Ed25519PublicKey};

use aws_lc_rs::signature::{Ed25519KeyPair, KeyPair, UnparsedPublicKey, ED25519};
use tracing::debug;

const ED25519_PUBLIC_KEY_LEN: usize = 32;

fn check_algorithm(algorithm: Algorithm) -> Result<()> {
    match algorithm {
        Algorithm::EdDSA => Ok(()),
        other => Err(Error::AlgorithmMismatch {
            algorithm: other.to_string(),
            engine: "EdDSA",
        }),
    }
}

/// Ed25519 signer
pub struct EdDsaSigner {
    key_pair: Ed25519KeyPair,
}

impl EdDsaSigner {
    pub fn new(algorithm: Algorithm, key: &Ed25519PrivateKey) -> Result<Self> {
        check_algorithm(algorithm)?;

        let key_pair = match &key.0 {
            Ed25519Private::Pkcs8(der) if der.is_empty() => return Err(Error::KeyEmpty),
            Ed25519Private::Pkcs8(der) => Ed25519KeyPair::from_pkcs8(der),
            Ed25519Private::Seed { seed, .. } if seed.is_empty() => return Err(Error::KeyEmpty),
            Ed25519Private::Seed { seed, public_key } => {
                Ed25519KeyPair::from_seed_and_public_key(seed, public_key)
            }
        }
        .map_err(|e| Error::KeyRejected(format!("Ed25519 private key: {e}")))?;

        debug!(%algorithm, "constructed EdDSA signer");
        Ok(Self { key_pair })
    }

    /// Verifier over the derived public key
    pub fn verifier(&self) -> EdDsaVerifier {
        EdDsaVerifier {
            key: Ed25519PublicKey(self.key_pair.public_key().as_ref().to_vec()),
        }
    }
}

impl TokenSigner for EdDsaSigner {
    fn algorithm(&self) -> Algorithm {
        Algorithm::EdDSA
    }

    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        Ok(self.key_pair.sign(signing_input).as_ref().to_vec())
    }
}

/// Ed25519 verifier
pub struct EdDsaVerifier {
    key: Ed25519PublicKey,
}

impl EdDsaVerifier {
    pub fn new(algorithm: Algorithm, key: Ed25519PublicKey) -> Result<Self> {
        check_algorithm(algorithm)?;
        match key.as_bytes().len() {
            0 => return Err(Error::KeyEmpty),
            ED25519_PUBLIC_KEY_LEN => {}
            other => {
                return Err(Error::KeyRejected(format!(
                    "Ed25519 public key must be {ED25519_PUBLIC_KEY_LEN} bytes, got {other}"
                )))
            }
        }

        debug!(%algorithm, "constructed EdDSA verifier");
        Ok(Self { key })
    }
}

impl TokenVerifier for EdDsaVerifier {
    fn algorithm(&self) -> Algorithm {
        Algorithm::EdDSA
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<bool> {
        let public_key = UnparsedPublicKey::new(&ED25519, self.key.as_bytes());
        Ok(public_key.verify(signing_input, signature).is_ok())
    }
}
