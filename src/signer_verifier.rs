//! Signer/verifier facade
//!
//! A [`JoseSignerVerifier`] is built once per key and algorithm. It owns up to
//! two engine halves: a signer (private and symmetric keys only) and a
//! verifier (always present). The facade is immutable and cheap to clone, so
//! a single instance can serve any number of threads.

use crate::algorithm::{
    ecdsa::{EcdsaSigner, EcdsaVerifier},
    eddsa::{EdDsaSigner, EdDsaVerifier},
    hmac::HmacEngine,
    none::NoneEngine,
    rsa::{RsaSigner, RsaVerifier},
    Algorithm, AlgorithmFamily, TokenSigner, TokenVerifier,
};
use crate::claims::ValidationParams;
use crate::error::{Error, Result, TokenError};
use crate::keys::Key;
use crate::token::{get_raw_token_parts, Header, Token};
use crate::utils::base64url;

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

type Signer = Arc<dyn TokenSigner>;
type Verifier = Arc<dyn TokenVerifier>;

/// Issues and checks compact JWS tokens for one key and algorithm
#[derive(Clone)]
pub struct JoseSignerVerifier {
    algorithm: Algorithm,
    signer: Option<Signer>,
    verifier: Option<Verifier>,
}

impl std::fmt::Debug for JoseSignerVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoseSignerVerifier")
            .field("algorithm", &self.algorithm)
            .field("can_sign", &self.can_sign())
            .field("can_verify", &self.can_verify())
            .finish()
    }
}

/// Whether `key` is the right shape for `algorithm`
fn key_fits(key: &Key, family: AlgorithmFamily) -> bool {
    matches!(
        (key, family),
        (Key::Symmetric(_), AlgorithmFamily::Hmac)
            | (
                Key::RsaPrivate(_) | Key::RsaPublic(_),
                AlgorithmFamily::RsaPkcs1 | AlgorithmFamily::RsaPss
            )
            | (Key::EcdsaPrivate(_) | Key::EcdsaPublic(_), AlgorithmFamily::Ecdsa)
            | (Key::Ed25519Private(_) | Key::Ed25519Public(_), AlgorithmFamily::EdDsa)
    )
}

impl JoseSignerVerifier {
    /// Build the engines for `algorithm` from `key`
    ///
    /// Private and symmetric keys produce a facade that signs and verifies;
    /// public keys produce a verify-only facade. `Algorithm::None` is refused
    /// here, see [`new_insecure`](Self::new_insecure).
    pub fn new(algorithm: Algorithm, key: Key) -> Result<Self> {
        if algorithm == Algorithm::None {
            return Err(Error::AlgorithmNoneRejected);
        }
        if !key_fits(&key, algorithm.family()) {
            return Err(Error::KeyTypeMismatch {
                algorithm: algorithm.to_string(),
                key_type: key.key_type().to_string(),
            });
        }

        let (signer, verifier): (Option<Signer>, Verifier) = match key {
            Key::Symmetric(secret) => {
                let engine = Arc::new(HmacEngine::new(algorithm, secret)?);
                (Some(engine.clone()), engine)
            }
            Key::RsaPrivate(private) => {
                let signer = RsaSigner::new(algorithm, private)?;
                let verifier = signer.verifier();
                (Some(Arc::new(signer)), Arc::new(verifier))
            }
            Key::RsaPublic(public) => (None, Arc::new(RsaVerifier::new(algorithm, public)?)),
            Key::EcdsaPrivate(private) => {
                let signer = EcdsaSigner::new(algorithm, &private)?;
                let verifier = signer.verifier();
                (Some(Arc::new(signer)), Arc::new(verifier))
            }
            Key::EcdsaPublic(public) => (None, Arc::new(EcdsaVerifier::new(algorithm, public)?)),
            Key::Ed25519Private(private) => {
                let signer = EdDsaSigner::new(algorithm, &private)?;
                let verifier = signer.verifier();
                (Some(Arc::new(signer)), Arc::new(verifier))
            }
            Key::Ed25519Public(public) => {
                (None, Arc::new(EdDsaVerifier::new(algorithm, public)?))
            }
        };

        debug!(%algorithm, can_sign = signer.is_some(), "signer/verifier ready");
        Ok(Self {
            algorithm,
            signer,
            verifier: Some(verifier),
        })
    }

    /// Facade for unsecured tokens (`alg: none`)
    ///
    /// Every token it verifies is reported authentic. Only use it where the
    /// transport already guarantees integrity.
    pub fn new_insecure(algorithm: Algorithm) -> Result<Self> {
        let engine = Arc::new(NoneEngine::new(algorithm)?);
        warn!("constructed signer/verifier for unsecured 'none' tokens");
        Ok(Self {
            algorithm,
            signer: Some(engine.clone()),
            verifier: Some(engine),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn can_sign(&self) -> bool {
        self.signer.is_some()
    }

    pub fn can_verify(&self) -> bool {
        self.verifier.is_some()
    }

    /// `{"alg": <algorithm>, "typ": "JWT"}`
    pub fn default_header(&self) -> Header {
        Header::new(self.algorithm).with_type("JWT")
    }

    /// Serialize, encode and sign `header` and `body` into a compact token
    ///
    /// The header is emitted as given; its `alg` is not checked against the
    /// facade. Unsecured tokens keep the trailing dot: `header.body.`
    pub fn generate_token<H, B>(&self, header: &H, body: &B) -> Result<String>
    where
        H: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let signer = self.signer.as_ref().ok_or(Error::SigningNotConfigured)?;

        let mut token = base64url::encode(serde_json::to_vec(header)?);
        token.push('.');
        token.push_str(&base64url::encode(serde_json::to_vec(body)?));

        if self.algorithm == Algorithm::None {
            token.push('.');
            return Ok(token);
        }

        let signature = signer.sign(token.as_bytes())?;
        token.push('.');
        token.push_str(&base64url::encode(signature));

        debug!(algorithm = %self.algorithm, "generated token");
        Ok(token)
    }

    /// Parse `raw` and check its signature; claims are not read
    ///
    /// The header must be well-formed JSON with an `alg` member. Its contents
    /// are not trusted or validated here. `Ok((token, false))` means the
    /// signature does not match.
    pub fn verify_signature(
        &self,
        raw: impl AsRef<[u8]>,
    ) -> std::result::Result<(Token, bool), TokenError> {
        let verifier = self
            .verifier
            .as_ref()
            .ok_or(Error::VerificationNotConfigured)?;

        let mut token = get_raw_token_parts(raw)?;
        if let Err(error) = token.bind_header() {
            return Err(TokenError::new(token, error));
        }

        let valid = match verifier.verify(&token.signing_input(), token.decoded_signature()) {
            Ok(valid) => valid,
            Err(error) => return Err(TokenError::new(token, error)),
        };
        token.record_signature(valid);

        debug!(algorithm = %self.algorithm, valid, "signature checked");
        Ok((token, valid))
    }

    /// Check the signature, then the registered claims
    ///
    /// Claims are only deserialized once the signature is valid; a bad
    /// signature returns `Ok((token, false))` with `claims_valid` unset. A
    /// claim that fails to decode or parse returns the token with the
    /// signature already recorded.
    pub fn verify_token(
        &self,
        raw: impl AsRef<[u8]>,
        params: Option<&ValidationParams>,
    ) -> std::result::Result<(Token, bool), TokenError> {
        let (mut token, signature_valid) = self.verify_signature(raw)?;
        if !signature_valid {
            return Ok((token, false));
        }

        let outcome = token.bind_claims().and_then(|claims| claims.validate(params));
        let claims_valid = match outcome {
            Ok(valid) => valid,
            Err(error) => return Err(TokenError::new(token, error)),
        };
        token.record_claims(claims_valid);

        debug!(algorithm = %self.algorithm, claims_valid, "token checked");
        Ok((token, signature_valid && claims_valid))
    }
}
