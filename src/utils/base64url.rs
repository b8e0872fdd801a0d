//! Base64URL encoding/decoding per RFC 4648 §5
//!
//! Thin wrapper around the `base64` crate. Output never carries `=` padding
//! and padded input is rejected.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode bytes to an unpadded Base64URL string
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode an unpadded Base64URL string to bytes
///
/// A length of `1 (mod 4)` cannot come from any byte string and is rejected.
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    let input = input.as_ref();
    if input.len() % 4 == 1 {
        return Err(Error::FormatInvalidBase64(format!(
            "length {} is not a valid unpadded Base64URL length",
            input.len()
        )));
    }

    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::FormatInvalidBase64(e.to_string()))
}
