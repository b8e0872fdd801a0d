use crate::algorithm::Algorithm;
use crate::error::Result;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JOSE header (RFC 7515 §4.1)
///
/// Only `alg` is required. Absent optional members are omitted on output and
/// members this struct does not name are kept in [`extra`](Self::extra).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// JWK Set URL
    #[serde(rename = "jku", default, skip_serializing_if = "Option::is_none")]
    pub jwk_set_url: Option<String>,

    /// Public key that signed the token, as a JWK
    #[serde(rename = "jwk", default, skip_serializing_if = "Option::is_none")]
    pub jwk: Option<Value>,

    /// Key ID
    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    /// Token type (typically "JWT")
    #[serde(rename = "typ", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Content type
    #[serde(rename = "cty", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Any other members
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Header {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm: algorithm.as_str().to_string(),
            jwk_set_url: None,
            jwk: None,
            key_id: None,
            token_type: None,
            content_type: None,
            extra: Map::new(),
        }
    }

    /// Parse algorithm from header
    pub fn parse_algorithm(&self) -> Result<Algorithm> {
        self.algorithm.parse()
    }

    pub fn with_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = Some(token_type.into());
        self
    }

    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_jwk_set_url(mut self, url: impl Into<String>) -> Self {
        self.jwk_set_url = Some(url.into());
        self
    }

    pub fn with_jwk(mut self, jwk: Value) -> Self {
        self.jwk = Some(jwk);
        self
    }

    /// Add a member not covered by the named fields
    pub fn with_member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Get key ID if present
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }
}
