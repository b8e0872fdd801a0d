//! ES256 / ES384 / ES512
//!
//! Signatures travel as fixed-width `R || S` (RFC 7518 §3.4), each coordinate
//! `ceil(bits / 8)` bytes: 32 for P-256, 48 for P-384, 66 for P-521. aws-lc-rs
//! produces and checks that form directly through its `*_FIXED` algorithms.

use crate::algorithm::{Algorithm, EcdsaCurve, TokenSigner, TokenVerifier};
use crate::error::{Error, Result};
use crate::keys::{EcdsaPrivateKey, EcdsaPublicKey};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    self, EcdsaKeyPair, EcdsaVerificationAlgorithm, KeyPair, ParsedPublicKey, UnparsedPublicKey,
};
use std::sync::Arc;
use tracing::debug;

fn curve_for(algorithm: Algorithm) -> Result<EcdsaCurve> {
    algorithm.ecdsa_curve().ok_or_else(|| Error::AlgorithmMismatch {
        algorithm: algorithm.to_string(),
        engine: "ECDSA",
    })
}

fn verification_algorithm(curve: EcdsaCurve) -> &'static EcdsaVerificationAlgorithm {
    match curve {
        EcdsaCurve::P256 => &signature::ECDSA_P256_SHA256_FIXED,
        EcdsaCurve::P384 => &signature::ECDSA_P384_SHA384_FIXED,
        EcdsaCurve::P521 => &signature::ECDSA_P521_SHA512_FIXED,
    }
}

/// ECDSA signer over a parsed private key
pub struct EcdsaSigner {
    algorithm: Algorithm,
    curve: EcdsaCurve,
    key_pair: Arc<EcdsaKeyPair>,
    rng: SystemRandom,
}

impl EcdsaSigner {
    /// Fails unless the key's curve is the one `algorithm` implies
    pub fn new(algorithm: Algorithm, key: &EcdsaPrivateKey) -> Result<Self> {
        let curve = curve_for(algorithm)?;
        if key.curve() != curve {
            return Err(Error::KeyCurveMismatch {
                algorithm: algorithm.to_string(),
                expected: curve.name().to_string(),
                found: key.curve().name().to_string(),
            });
        }

        debug!(%algorithm, %curve, "constructed ECDSA signer");
        Ok(Self {
            algorithm,
            curve,
            key_pair: Arc::clone(key.key_pair()),
            rng: SystemRandom::new(),
        })
    }

    /// Verifier over the derived public point
    pub fn verifier(&self) -> EcdsaVerifier {
        EcdsaVerifier {
            algorithm: self.algorithm,
            curve: self.curve,
            key: EcdsaPublicKey::new(self.key_pair.public_key().as_ref()),
        }
    }
}

impl TokenSigner for EcdsaSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        let signature = self
            .key_pair
            .sign(&self.rng, signing_input)
            .map_err(|e| Error::CryptoFailure(format!("{} signing: {e}", self.algorithm)))?;
        Ok(signature.as_ref().to_vec())
    }
}

/// ECDSA verifier over an uncompressed public point
pub struct EcdsaVerifier {
    algorithm: Algorithm,
    curve: EcdsaCurve,
    key: EcdsaPublicKey,
}

impl EcdsaVerifier {
    /// The point must be uncompressed SEC1 (`0x04 || X || Y`) and on the curve
    pub fn new(algorithm: Algorithm, key: EcdsaPublicKey) -> Result<Self> {
        let curve = curve_for(algorithm)?;

        let point = key.as_bytes();
        let expected = 1 + 2 * curve.coordinate_len();
        if point.len() != expected || point[0] != 0x04 {
            return Err(Error::KeyRejected(format!(
                "{curve} public key must be a {expected}-byte uncompressed point, got {} bytes",
                point.len()
            )));
        }
        ParsedPublicKey::new(verification_algorithm(curve), point)
            .map_err(|e| Error::KeyRejected(format!("{curve} public key: {e}")))?;

        debug!(%algorithm, %curve, "constructed ECDSA verifier");
        Ok(Self {
            algorithm,
            curve,
            key,
        })
    }
}

impl TokenVerifier for EcdsaVerifier {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// `Ok(false)` only for a well-formed signature that does not match
    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<bool> {
        let expected = self.curve.signature_len();
        if signature.len() != expected {
            return Err(Error::SignatureLengthInvalid {
                expected,
                found: signature.len(),
            });
        }

        let public_key =
            UnparsedPublicKey::new(verification_algorithm(self.curve), self.key.as_bytes());
        Ok(public_key.verify(signing_input, signature).is_ok())
    }
}
