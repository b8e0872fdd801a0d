//! HS256 / HS384 / HS512
//!
//! One engine serves both directions with the same shared secret.

use crate::algorithm::{Algorithm, AlgorithmFamily, TokenSigner, TokenVerifier};
use crate::error::{Error, Result};
use crate::keys::SymmetricKey;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use tracing::debug;

/// HMAC signer and verifier
pub struct HmacEngine {
    algorithm: Algorithm,
    key: SymmetricKey,
}

impl HmacEngine {
    /// Fails when the key is empty or `algorithm` is not HS*
    pub fn new(algorithm: Algorithm, key: SymmetricKey) -> Result<Self> {
        if algorithm.family() != AlgorithmFamily::Hmac {
            return Err(Error::AlgorithmMismatch {
                algorithm: algorithm.to_string(),
                engine: "HMAC",
            });
        }
        if key.is_empty() {
            return Err(Error::KeyEmpty);
        }

        debug!(%algorithm, "constructed HMAC engine");
        Ok(Self { algorithm, key })
    }

    fn mac(&self, message: &[u8]) -> Result<Vec<u8>> {
        let secret = self.key.as_bytes();
        let tag = match self.algorithm {
            Algorithm::HS256 => compute::<Hmac<Sha256>>(secret, message)?,
            Algorithm::HS384 => compute::<Hmac<Sha384>>(secret, message)?,
            Algorithm::HS512 => compute::<Hmac<Sha512>>(secret, message)?,
            other => {
                return Err(Error::AlgorithmMismatch {
                    algorithm: other.to_string(),
                    engine: "HMAC",
                })
            }
        };
        Ok(tag)
    }
}

fn compute<M: Mac + hmac::digest::KeyInit>(secret: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as hmac::digest::KeyInit>::new_from_slice(secret)
        .map_err(|e| Error::CryptoFailure(format!("HMAC key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

impl TokenSigner for HmacEngine {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        if signing_input.is_empty() {
            return Err(Error::PayloadEmpty);
        }
        self.mac(signing_input)
    }
}

impl TokenVerifier for HmacEngine {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<bool> {
        if signing_input.is_empty() {
            return Err(Error::PayloadEmpty);
        }
        if signature.is_empty() {
            return Err(Error::SignatureEmpty);
        }

        let expected = self.mac(signing_input)?;
        // constant_time_eq returns false on length mismatch without early exit on content
        Ok(constant_time_eq(&expected, signature))
    }
}
