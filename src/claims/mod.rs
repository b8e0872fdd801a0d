mod validator;

pub use validator::ValidationParams;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Registered JWT claims (RFC 7519 §4.1)
///
/// Time claims are kept as decimal strings of seconds since the Unix epoch and
/// are only parsed when validated. On input they may be JSON strings or JSON
/// numbers; either way they are stored, and re-emitted, as strings.
///
/// `aud` is a single string. A JSON array in `aud` fails to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer (iss)
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Subject (sub)
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Audience (aud)
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    /// Expiration Time (exp)
    #[serde(
        rename = "exp",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "numeric_text"
    )]
    pub expiration: Option<String>,

    /// Not Before (nbf)
    #[serde(
        rename = "nbf",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "numeric_text"
    )]
    pub not_before: Option<String>,

    /// Issued At (iat)
    #[serde(
        rename = "iat",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "numeric_text"
    )]
    pub issued_at: Option<String>,

    /// JWT ID (jti)
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub jwt_id: Option<String>,

    /// Private and public claims outside the registered set
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericText {
    Text(String),
    Number(serde_json::Number),
}

fn numeric_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<NumericText>::deserialize(deserializer)?.map(|value| match value {
            NumericText::Text(text) => text,
            NumericText::Number(number) => number.to_string(),
        }),
    )
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set `exp` to `seconds` since the Unix epoch
    pub fn with_expiration(mut self, seconds: i64) -> Self {
        self.expiration = Some(seconds.to_string());
        self
    }

    /// Set `nbf` to `seconds` since the Unix epoch
    pub fn with_not_before(mut self, seconds: i64) -> Self {
        self.not_before = Some(seconds.to_string());
        self
    }

    /// Set `iat` to `seconds` since the Unix epoch
    pub fn with_issued_at(mut self, seconds: i64) -> Self {
        self.issued_at = Some(seconds.to_string());
        self
    }

    pub fn with_jwt_id(mut self, jwt_id: impl Into<String>) -> Self {
        self.jwt_id = Some(jwt_id.into());
        self
    }

    /// Add a claim outside the registered set
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}
