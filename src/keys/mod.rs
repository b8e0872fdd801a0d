//! Key material accepted by [`JoseSignerVerifier::new`](crate::JoseSignerVerifier::new)
//!
//! [`Key`] is a closed set of shapes. Each shape selects one engine family and
//! decides whether the resulting facade can sign, or only verify:
//!
//! | shape            | engine | capability  |
//! |------------------|--------|-------------|
//! | `Symmetric`      | HMAC   | sign+verify |
//! | `RsaPrivate`     | RSA    | sign+verify |
//! | `RsaPublic`      | RSA    | verify      |
//! | `EcdsaPrivate`   | ECDSA  | sign+verify |
//! | `EcdsaPublic`    | ECDSA  | verify      |
//! | `Ed25519Private` | EdDSA  | sign+verify |
//! | `Ed25519Public`  | EdDSA  | verify      |

use crate::algorithm::EcdsaCurve;
use crate::error::{Error, Result};

use aws_lc_rs::signature::{
    EcdsaKeyPair, ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED_SIGNING,
    ECDSA_P521_SHA512_FIXED_SIGNING,
};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use std::sync::Arc;

/// Key material for one engine
#[derive(Clone)]
pub enum Key {
    /// Shared secret for HMAC algorithms
    Symmetric(SymmetricKey),

    /// RSA private key for RS* and PS*
    RsaPrivate(RsaPrivateKey),

    /// RSA public key for RS* and PS*
    RsaPublic(RsaPublicKey),

    /// ECDSA private key for ES*
    EcdsaPrivate(EcdsaPrivateKey),

    /// ECDSA public key for ES*
    EcdsaPublic(EcdsaPublicKey),

    /// Ed25519 private key for EdDSA
    Ed25519Private(Ed25519PrivateKey),

    /// Ed25519 public key for EdDSA
    Ed25519Public(Ed25519PublicKey),
}

impl Key {
    /// Create a symmetric key from bytes
    pub fn symmetric(secret: impl Into<Vec<u8>>) -> Self {
        Key::Symmetric(SymmetricKey::new(secret))
    }

    /// Wrap an RSA private key
    pub fn rsa_private(key: RsaPrivateKey) -> Self {
        Key::RsaPrivate(key)
    }

    /// Wrap an RSA public key
    pub fn rsa_public(key: RsaPublicKey) -> Self {
        Key::RsaPublic(key)
    }

    /// Build an RSA public key from big-endian modulus and exponent bytes,
    /// as found in the `n` and `e` members of a JWK
    pub fn rsa_public_from_components(n: &[u8], e: &[u8]) -> Result<Self> {
        if n.is_empty() || e.is_empty() {
            return Err(Error::KeyEmpty);
        }

        RsaPublicKey::new(BigUint::from_bytes_be(n), BigUint::from_bytes_be(e))
            .map(Key::RsaPublic)
            .map_err(|e| Error::KeyRejected(format!("RSA public key: {e}")))
    }

    /// Parse an unencrypted PKCS#8 ECDSA private key; the curve is detected
    pub fn ecdsa_private_pkcs8(der: impl AsRef<[u8]>) -> Result<Self> {
        EcdsaPrivateKey::from_pkcs8(der).map(Key::EcdsaPrivate)
    }

    /// ECDSA public key as an uncompressed SEC1 point (`0x04 || X || Y`)
    pub fn ecdsa_public(point: impl Into<Vec<u8>>) -> Self {
        Key::EcdsaPublic(EcdsaPublicKey::new(point))
    }

    /// Unencrypted PKCS#8 Ed25519 private key
    pub fn ed25519_private_pkcs8(der: impl Into<Vec<u8>>) -> Self {
        Key::Ed25519Private(Ed25519PrivateKey(Ed25519Private::Pkcs8(der.into())))
    }

    /// Ed25519 private key from its 32-byte seed and 32-byte public key
    pub fn ed25519_from_seed(seed: impl Into<Vec<u8>>, public_key: impl Into<Vec<u8>>) -> Self {
        Key::Ed25519Private(Ed25519PrivateKey(Ed25519Private::Seed {
            seed: seed.into(),
            public_key: public_key.into(),
        }))
    }

    /// Raw 32-byte Ed25519 public key
    pub fn ed25519_public(bytes: impl Into<Vec<u8>>) -> Self {
        Key::Ed25519Public(Ed25519PublicKey(bytes.into()))
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            Key::Symmetric(_) => "Symmetric",
            Key::RsaPrivate(_) => "RSA private",
            Key::RsaPublic(_) => "RSA public",
            Key::EcdsaPrivate(_) => "ECDSA private",
            Key::EcdsaPublic(_) => "ECDSA public",
            Key::Ed25519Private(_) => "Ed25519 private",
            Key::Ed25519Public(_) => "Ed25519 public",
        }
    }

    /// Whether this key shape yields a signing-capable facade
    pub fn can_sign(&self) -> bool {
        matches!(
            self,
            Key::Symmetric(_) | Key::RsaPrivate(_) | Key::EcdsaPrivate(_) | Key::Ed25519Private(_)
        )
    }
}

// Key material never reaches Debug output
impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Key").field(&self.key_type()).finish()
    }
}

impl From<SymmetricKey> for Key {
    fn from(key: SymmetricKey) -> Self {
        Key::Symmetric(key)
    }
}

impl From<RsaPrivateKey> for Key {
    fn from(key: RsaPrivateKey) -> Self {
        Key::RsaPrivate(key)
    }
}

impl From<RsaPublicKey> for Key {
    fn from(key: RsaPublicKey) -> Self {
        Key::RsaPublic(key)
    }
}

/// Shared secret for HMAC
#[derive(Clone)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl From<&[u8]> for SymmetricKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret)
    }
}

impl From<Vec<u8>> for SymmetricKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for SymmetricKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

/// Parsed ECDSA private key with its detected curve
///
/// The PKCS#8 document is parsed once; signers share the resulting key pair.
#[derive(Clone)]
pub struct EcdsaPrivateKey {
    key_pair: Arc<EcdsaKeyPair>,
    curve: EcdsaCurve,
}

impl EcdsaPrivateKey {
    /// Parse PKCS#8 DER, trying each supported curve in turn
    pub fn from_pkcs8(der: impl AsRef<[u8]>) -> Result<Self> {
        let pkcs8 = der.as_ref();
        if pkcs8.is_empty() {
            return Err(Error::KeyEmpty);
        }

        [
            (EcdsaCurve::P256, &ECDSA_P256_SHA256_FIXED_SIGNING),
            (EcdsaCurve::P384, &ECDSA_P384_SHA384_FIXED_SIGNING),
            (EcdsaCurve::P521, &ECDSA_P521_SHA512_FIXED_SIGNING),
        ]
        .into_iter()
        .find_map(|(curve, signing)| {
            EcdsaKeyPair::from_pkcs8(signing, pkcs8)
                .ok()
                .map(|key_pair| Self {
                    key_pair: Arc::new(key_pair),
                    curve,
                })
        })
        .ok_or_else(|| {
            Error::KeyRejected("not a PKCS#8 ECDSA key on P-256, P-384 or P-521".to_string())
        })
    }

    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    pub(crate) fn key_pair(&self) -> &Arc<EcdsaKeyPair> {
        &self.key_pair
    }
}

/// Uncompressed SEC1 ECDSA public point
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcdsaPublicKey {
    point: Vec<u8>,
}

impl EcdsaPublicKey {
    pub fn new(point: impl Into<Vec<u8>>) -> Self {
        Self {
            point: point.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.point
    }
}

#[derive(Clone)]
pub(crate) enum Ed25519Private {
    Pkcs8(Vec<u8>),
    Seed { seed: Vec<u8>, public_key: Vec<u8> },
}

/// Ed25519 private key, either PKCS#8 or seed plus public key
#[derive(Clone)]
pub struct Ed25519PrivateKey(pub(crate) Ed25519Private);

/// Raw Ed25519 public key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ed25519PublicKey(pub(crate) Vec<u8>);

impl Ed25519PublicKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
