use crate::algorithm::Algorithm;
use crate::error::Result;

/// Signing half of an engine
///
/// Implementations are immutable after construction and may be shared
/// across threads.
pub trait TokenSigner: Send + Sync {
    /// The algorithm this engine was constructed for
    fn algorithm(&self) -> Algorithm;

    /// Sign the JWS signing input, returning the raw signature bytes
    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>>;
}

/// Verification half of an engine
pub trait TokenVerifier: Send + Sync {
    /// The algorithm this engine was constructed for
    fn algorithm(&self) -> Algorithm;

    /// Verify `signature` over `signing_input`
    ///
    /// `Ok(false)` means the signature is well-formed but does not match.
    /// `Err` means authenticity could not be evaluated.
    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<bool>;
}
