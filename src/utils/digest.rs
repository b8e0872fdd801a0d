//! Digest dispatch for the hash-then-sign algorithms

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use sha2::{Digest, Sha256, Sha384, Sha512};

/// SHA-2 variant implied by an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Digest used by `algorithm`
    ///
    /// HMAC computes its own digest inside the MAC and `none` has nothing to
    /// hash, so both are reported as [`Error::DigestUnavailable`]. `EdDSA`
    /// maps to SHA-512 although the Ed25519 engine never consumes it.
    pub fn for_algorithm(algorithm: Algorithm) -> Result<Self> {
        match algorithm {
            Algorithm::RS256 | Algorithm::PS256 | Algorithm::ES256 => Ok(Self::Sha256),
            Algorithm::RS384 | Algorithm::PS384 | Algorithm::ES384 => Ok(Self::Sha384),
            Algorithm::RS512 | Algorithm::PS512 | Algorithm::ES512 | Algorithm::EdDSA => {
                Ok(Self::Sha512)
            }
            Algorithm::HS256
            | Algorithm::HS384
            | Algorithm::HS512
            | Algorithm::None => Err(Error::DigestUnavailable(algorithm.to_string())),
        }
    }

    /// Digest length in bytes
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Hash `data`
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

/// Hash `plaintext` with the digest implied by `algorithm`
pub fn hash(algorithm: Algorithm, plaintext: &[u8]) -> Result<Vec<u8>> {
    HashAlgorithm::for_algorithm(algorithm).map(|h| h.digest(plaintext))
}
