//! # jwsign - JWS Compact Signing and Verification
//!
//! **jwsign** issues and verifies JSON Web Tokens in the JWS compact
//! serialization (`header.body.signature`) and validates their registered
//! claims against server-side parameters.
//!
//! ## Overview
//!
//! A [`JoseSignerVerifier`] is constructed once from an [`Algorithm`] and a
//! [`Key`]. The key's shape decides what the facade can do: private and
//! symmetric keys sign and verify, public keys only verify. Construction picks
//! the engine for the algorithm's family and checks that key and algorithm fit
//! together, so a mismatch is reported once, up front, instead of on every
//! token.
//!
//! ```
//! use jwsign::{Algorithm, Claims, JoseSignerVerifier, Key, ValidationParams};
//!
//! # fn main() -> jwsign::Result<()> {
//! let facade = JoseSignerVerifier::new(Algorithm::HS256, Key::symmetric(b"0123456789abcdef".to_vec()))?;
//!
//! let claims = Claims::new().with_issuer("joe").with_expiration(4102444800);
//! let raw = facade.generate_token(&facade.default_header(), &claims)?;
//!
//! let params = ValidationParams::new().accept_issuer("joe");
//! let (token, valid) = facade.verify_token(&raw, Some(&params))?;
//! assert!(valid);
//! assert_eq!(token.claims().and_then(|c| c.issuer.as_deref()), Some("joe"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Verification Flow
//!
//! ```text
//! raw bytes
//!     │ get_raw_token_parts()      split on '.', base64url-decode
//!     ▼
//! Parsed ──► HeaderBound           header JSON must be well-formed
//!     │ verifier.verify()          over the still-encoded `header.body`
//!     ▼
//! SignatureChecked                 stop here with `false` if it does not match
//!     │ Claims::validate()         nbf, exp, iss, sub, aud, jti
//!     ▼
//! ClaimsBound ──► ClaimsChecked
//! ```
//!
//! ## Outcomes
//!
//! Verification returns `Ok((token, bool))` when the token could be
//! evaluated and `Err` when it could not. A forged signature or a claim
//! outside the accepted sets is `Ok((token, false))`, not an error. Errors are
//! grouped by [`ErrorKind`]: configuration, format, crypto, claim parsing.
//! The verify methods return a [`TokenError`], which carries the token at the
//! stage it reached once the raw string has been decoded. A token whose `exp`
//! is not a number still reports that its signature was valid.
//!
//! ## Algorithm Support
//!
//! - **HMAC**: HS256, HS384, HS512
//! - **RSA PKCS#1 v1.5**: RS256, RS384, RS512
//! - **RSA-PSS**: PS256, PS384, PS512
//! - **ECDSA**: ES256, ES384, ES512 (fixed-width `R || S` signatures)
//! - **EdDSA**: Ed25519
//! - **none**: only through [`JoseSignerVerifier::new_insecure`]
//!
//! ## Security
//!
//! HMAC verification uses constant-time comparison via the
//! [`constant_time_eq`](https://crates.io/crates/constant_time_eq) crate.
//! The verifier never looks at the header's `alg` to choose an engine; the
//! engine is fixed when the facade is built.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515): JSON Web Signature (JWS)
//! - [RFC 7518](https://datatracker.ietf.org/doc/html/rfc7518): JSON Web Algorithms (JWA)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519): JSON Web Token (JWT)
//! - [RFC 8037](https://datatracker.ietf.org/doc/html/rfc8037): EdDSA in JOSE

// Core modules
pub mod error;
pub mod utils;

// Algorithm system
pub mod algorithm;
pub mod keys;

// Claims and validation
pub mod claims;

// Token model
pub mod token;

// Signer/verifier facade (main public API)
pub mod signer_verifier;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use signer_verifier::JoseSignerVerifier;

pub use algorithm::{Algorithm, AlgorithmFamily, EcdsaCurve, TokenSigner, TokenVerifier};
pub use claims::{Claims, ValidationParams};
pub use error::{Error, ErrorKind, Result, TokenError};
pub use keys::Key;
pub use token::{get_raw_token_parts, Header, Token, TokenStage};
pub use utils::{base64url, hash};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_parse_emit_preserves_header_and_claims() {
        let facade =
            JoseSignerVerifier::new(Algorithm::HS384, Key::symmetric(b"secret".to_vec())).unwrap();
        let header = facade.default_header().with_key_id("k1").with_member("x-custom", 7);
        let claims = Claims::new()
            .with_subject("user-1")
            .with_jwt_id("id-1")
            .with_issued_at(1_700_000_000)
            .with_claim("role", "admin");

        let raw = facade.generate_token(&header, &claims).unwrap();
        let (token, valid) = facade.verify_token(&raw, None).unwrap();
        assert!(valid);
        assert_eq!(token.header(), Some(&header));
        assert_eq!(token.claims(), Some(&claims));
    }

    #[test]
    fn test_facade_shared_across_threads() {
        let rng = aws_lc_rs::rand::SystemRandom::new();
        let pkcs8 = aws_lc_rs::signature::EcdsaKeyPair::generate_pkcs8(
            &aws_lc_rs::signature::ECDSA_P256_SHA256_FIXED_SIGNING,
            &rng,
        )
        .unwrap();
        let key = Key::ecdsa_private_pkcs8(pkcs8.as_ref()).unwrap();
        let facade = Arc::new(JoseSignerVerifier::new(Algorithm::ES256, key).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let facade = Arc::clone(&facade);
                thread::spawn(move || {
                    let claims = Claims::new().with_subject(format!("worker-{i}"));
                    let raw = facade
                        .generate_token(&facade.default_header(), &claims)
                        .unwrap();
                    let (token, valid) = facade.verify_token(&raw, None).unwrap();
                    assert!(valid);
                    token.claims().and_then(|c| c.subject.clone())
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(format!("worker-{i}")));
        }
    }
}
