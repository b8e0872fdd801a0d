use crate::error::{Error, Result};
use crate::token::Token;
use crate::utils::base64url;

/// Split a compact serialization into its segments and decode them
///
/// Two segments (`header.body`) or three (`header.body.signature`) are
/// accepted; the signature segment may be empty. Nothing is deserialized yet.
pub fn get_raw_token_parts(raw: impl AsRef<[u8]>) -> Result<Token> {
    let raw = raw.as_ref();
    let parts: Vec<&[u8]> = raw.split(|b| *b == b'.').collect();

    let (header, body, signature) = match parts.as_slice() {
        [header, body] => (*header, *body, None),
        [header, body, signature] => (*header, *body, Some(*signature)),
        _ => return Err(Error::FormatInvalid { parts: parts.len() }),
    };

    let mut token = Token {
        raw: raw.to_vec(),
        decoded_header: base64url::decode(header)?,
        decoded_body: base64url::decode(body)?,
        raw_header: header.to_vec(),
        raw_body: body.to_vec(),
        ..Token::default()
    };

    if let Some(signature) = signature {
        token.decoded_signature = base64url::decode(signature)?;
        token.raw_signature = signature.to_vec();
    }

    token.mark_parsed();
    Ok(token)
}
