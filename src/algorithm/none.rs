//! Unsecured JWS (`alg: none`)
//!
//! Only reachable through
//! [`JoseSignerVerifier::new_insecure`](crate::JoseSignerVerifier::new_insecure).

use crate::algorithm::{Algorithm, TokenSigner, TokenVerifier};
use crate::error::{Error, Result};

/// Engine that produces empty signatures and accepts any signature
#[derive(Debug)]
pub struct NoneEngine;

impl NoneEngine {
    pub fn new(algorithm: Algorithm) -> Result<Self> {
        match algorithm {
            Algorithm::None => Ok(NoneEngine),
            other => Err(Error::AlgorithmMismatch {
                algorithm: other.to_string(),
                engine: "none",
            }),
        }
    }
}

impl TokenSigner for NoneEngine {
    fn algorithm(&self) -> Algorithm {
        Algorithm::None
    }

    fn sign(&self, _signing_input: &[u8]) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

impl TokenVerifier for NoneEngine {
    fn algorithm(&self) -> Algorithm {
        Algorithm::None
    }

    fn verify(&self, _signing_input: &[u8], _signature: &[u8]) -> Result<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_engine() {
        let engine = NoneEngine::new(Algorithm::None).unwrap();
        assert!(engine.sign(b"a.b").unwrap().is_empty());
        assert!(engine.verify(b"a.b", b"").unwrap());
        assert!(engine.verify(b"a.b", b"anything").unwrap());
    }

    #[test]
    fn test_only_none_accepted() {
        assert!(matches!(
            NoneEngine::new(Algorithm::HS256),
            Err(Error::AlgorithmMismatch { .. })
        ));
    }
}
