//! Errors for jwsign
//!
//! Every failure the crate can report is a variant of [`Error`]. Variants are
//! grouped into four kinds (see [`ErrorKind`]) so callers can tell "the token
//! is not authentic" (a plain `false`, never an error) apart from "the token
//! could not be evaluated" (an `Err`).

use crate::token::Token;

use thiserror::Error;

/// jwsign Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Key material is empty")]
    KeyEmpty,

    #[error("Key rejected: {0}")]
    KeyRejected(String),

    #[error("Key type {key_type} cannot be used with algorithm '{algorithm}'")]
    KeyTypeMismatch { algorithm: String, key_type: String },

    #[error("Key curve {found} does not match algorithm '{algorithm}' (expected {expected})")]
    KeyCurveMismatch {
        algorithm: String,
        expected: String,
        found: String,
    },

    #[error("Algorithm '{algorithm}' is not supported by the {engine} engine")]
    AlgorithmMismatch {
        algorithm: String,
        engine: &'static str,
    },

    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is only available through the insecure constructor")]
    AlgorithmNoneRejected,

    #[error("No digest is defined for algorithm '{0}'")]
    DigestUnavailable(String),

    #[error("Not configured for signing: the key provided can only verify")]
    SigningNotConfigured,

    #[error("Not configured for verification")]
    VerificationNotConfigured,

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid compact serialization: expected 2 or 3 parts separated by '.', found {parts}")]
    FormatInvalid { parts: usize },

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON processing failed: {0}")]
    FormatInvalidJson(String),

    #[error("Signature length invalid: expected {expected} bytes, received {found}")]
    SignatureLengthInvalid { expected: usize, found: usize },

    #[error("Signing input cannot be empty")]
    PayloadEmpty,

    #[error("Signature cannot be empty")]
    SignatureEmpty,

    // ============================================================================
    // Crypto Errors
    // ============================================================================
    #[error("Cryptographic operation failed: {0}")]
    CryptoFailure(String),

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Claim '{claim}' is not a decimal integer: '{value}'")]
    ClaimParse { claim: &'static str, value: String },
}

/// Classification of [`Error`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unusable key, algorithm not compatible with key or engine
    Config,
    /// Malformed compact serialization, base64url, JSON or signature length
    Format,
    /// The underlying primitive failed for a reason other than a bad signature
    Crypto,
    /// `exp` or `nbf` is not a decimal integer
    ClaimParse,
}

impl Error {
    /// The kind this error belongs to
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::KeyEmpty
            | Error::KeyRejected(_)
            | Error::KeyTypeMismatch { .. }
            | Error::KeyCurveMismatch { .. }
            | Error::AlgorithmMismatch { .. }
            | Error::AlgorithmUnsupported(_)
            | Error::AlgorithmNoneRejected
            | Error::DigestUnavailable(_)
            | Error::SigningNotConfigured
            | Error::VerificationNotConfigured => ErrorKind::Config,

            Error::FormatInvalid { .. }
            | Error::FormatInvalidBase64(_)
            | Error::FormatInvalidJson(_)
            | Error::SignatureLengthInvalid { .. }
            | Error::PayloadEmpty
            | Error::SignatureEmpty => ErrorKind::Format,

            Error::CryptoFailure(_) => ErrorKind::Crypto,

            Error::ClaimParse { .. } => ErrorKind::ClaimParse,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::FormatInvalidJson(err.to_string())
    }
}

/// Result type alias for jwsign operations
pub type Result<T> = std::result::Result<T, Error>;

/// A verification failure together with the token as far as it got
///
/// The token is absent when the raw string could not be split and decoded.
/// Otherwise it is returned at the stage it reached, so a caller can still
/// see that the signature was valid when a claim later failed to parse.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct TokenError {
    token: Option<Box<Token>>,
    error: Error,
}

impl TokenError {
    pub(crate) fn new(token: Token, error: Error) -> Self {
        Self {
            token: Some(Box::new(token)),
            error,
        }
    }

    /// The partially populated token, if parsing got that far
    pub fn token(&self) -> Option<&Token> {
        self.token.as_deref()
    }

    /// The underlying error
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// The kind of the underlying error
    pub const fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Split into the token, if any, and the error
    pub fn into_parts(self) -> (Option<Token>, Error) {
        (self.token.map(|token| *token), self.error)
    }
}

impl From<Error> for TokenError {
    fn from(error: Error) -> Self {
        Self { token: None, error }
    }
}

impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        err.error
    }
}
