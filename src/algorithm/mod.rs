mod traits;

pub mod ecdsa;
pub mod eddsa;
pub mod hmac;
pub mod none;
pub mod rsa;

pub use traits::{TokenSigner, TokenVerifier};

use crate::error::{Error, Result};
use std::str::FromStr;

/// Algorithm identifier carried in the JWS `alg` header (RFC 7518 §3.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,

    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,

    /// RSASSA-PSS with SHA-256 and MGF1-SHA-256
    PS256,
    /// RSASSA-PSS with SHA-384 and MGF1-SHA-384
    PS384,
    /// RSASSA-PSS with SHA-512 and MGF1-SHA-512
    PS512,

    /// ECDSA with P-256 and SHA-256
    ES256,
    /// ECDSA with P-384 and SHA-384
    ES384,
    /// ECDSA with P-521 and SHA-512
    ES512,

    /// Ed25519
    EdDSA,

    /// Unsecured JWS, serialized as `"none"`
    None,
}

/// Engine family an [`Algorithm`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmFamily {
    Hmac,
    RsaPkcs1,
    RsaPss,
    Ecdsa,
    EdDsa,
    None,
}

/// Elliptic curves used by the ES* algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcdsaCurve {
    /// NIST P-256 (ES256)
    P256,
    /// NIST P-384 (ES384)
    P384,
    /// NIST P-521 (ES512)
    P521,
}

impl EcdsaCurve {
    /// Curve name as used in JWK `crv`
    pub const fn name(self) -> &'static str {
        match self {
            EcdsaCurve::P256 => "P-256",
            EcdsaCurve::P384 => "P-384",
            EcdsaCurve::P521 => "P-521",
        }
    }

    /// Field size in bits
    pub const fn bits(self) -> usize {
        match self {
            EcdsaCurve::P256 => 256,
            EcdsaCurve::P384 => 384,
            EcdsaCurve::P521 => 521,
        }
    }

    /// Width of one signature coordinate: `ceil(bits / 8)`
    pub const fn coordinate_len(self) -> usize {
        self.bits().div_ceil(8)
    }

    /// Length of a fixed-width `R || S` signature
    pub const fn signature_len(self) -> usize {
        self.coordinate_len() * 2
    }

    /// The ES* algorithm bound to this curve
    pub const fn algorithm(self) -> Algorithm {
        match self {
            EcdsaCurve::P256 => Algorithm::ES256,
            EcdsaCurve::P384 => Algorithm::ES384,
            EcdsaCurve::P521 => Algorithm::ES512,
        }
    }
}

impl std::fmt::Display for EcdsaCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Algorithm {
    /// Every algorithm in the catalog
    pub const ALL: [Algorithm; 14] = [
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
        Algorithm::PS256,
        Algorithm::PS384,
        Algorithm::PS512,
        Algorithm::ES256,
        Algorithm::ES384,
        Algorithm::ES512,
        Algorithm::EdDSA,
        Algorithm::None,
    ];

    /// Registered `alg` value
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::PS256 => "PS256",
            Algorithm::PS384 => "PS384",
            Algorithm::PS512 => "PS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::ES512 => "ES512",
            Algorithm::EdDSA => "EdDSA",
            Algorithm::None => "none",
        }
    }

    /// Engine family implementing this algorithm
    pub const fn family(&self) -> AlgorithmFamily {
        match self {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => AlgorithmFamily::Hmac,
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => AlgorithmFamily::RsaPkcs1,
            Algorithm::PS256 | Algorithm::PS384 | Algorithm::PS512 => AlgorithmFamily::RsaPss,
            Algorithm::ES256 | Algorithm::ES384 | Algorithm::ES512 => AlgorithmFamily::Ecdsa,
            Algorithm::EdDSA => AlgorithmFamily::EdDsa,
            Algorithm::None => AlgorithmFamily::None,
        }
    }

    /// Curve implied by an ES* algorithm
    pub const fn ecdsa_curve(&self) -> Option<EcdsaCurve> {
        match self {
            Algorithm::ES256 => Some(EcdsaCurve::P256),
            Algorithm::ES384 => Some(EcdsaCurve::P384),
            Algorithm::ES512 => Some(EcdsaCurve::P521),
            _ => None,
        }
    }

    /// Check if algorithm is HMAC-based (symmetric)
    pub const fn is_symmetric(&self) -> bool {
        matches!(self.family(), AlgorithmFamily::Hmac)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parse an `alg` value; matching is case-sensitive
    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| Error::AlgorithmUnsupported(s.to_string()))
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
