use crate::algorithm::Algorithm;
use crate::claims::Claims;
use crate::error::Result;
use crate::token::Header;

use serde::de::DeserializeOwned;

/// How far a [`Token`] has progressed through verification
///
/// Stages only move forward. Fields belonging to a stage the token has not
/// reached keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TokenStage {
    #[default]
    New,
    /// Segments split and base64url-decoded
    Parsed,
    /// Header deserialized
    HeaderBound,
    /// Signature verified, `signature_valid` set
    SignatureChecked,
    /// Claims deserialized
    ClaimsBound,
    /// Claims validated, `claims_valid` set
    ClaimsChecked,
}

/// A compact-serialized JWS with its raw and decoded parts
#[derive(Debug, Clone, Default)]
pub struct Token {
    pub(crate) stage: TokenStage,
    pub(crate) algorithm: Option<Algorithm>,
    pub(crate) header: Option<Header>,
    pub(crate) claims: Option<Claims>,

    pub(crate) raw: Vec<u8>,
    pub(crate) raw_header: Vec<u8>,
    pub(crate) raw_body: Vec<u8>,
    pub(crate) raw_signature: Vec<u8>,

    pub(crate) decoded_header: Vec<u8>,
    pub(crate) decoded_body: Vec<u8>,
    pub(crate) decoded_signature: Vec<u8>,

    pub(crate) signature_valid: bool,
    pub(crate) claims_valid: bool,
}

impl Token {
    pub fn stage(&self) -> TokenStage {
        self.stage
    }

    /// Algorithm named by the header, once bound and recognized
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// The complete compact serialization
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn raw_header(&self) -> &[u8] {
        &self.raw_header
    }

    pub fn raw_body(&self) -> &[u8] {
        &self.raw_body
    }

    /// Empty for the unsigned two-part form
    pub fn raw_signature(&self) -> &[u8] {
        &self.raw_signature
    }

    pub fn decoded_header(&self) -> &[u8] {
        &self.decoded_header
    }

    pub fn decoded_body(&self) -> &[u8] {
        &self.decoded_body
    }

    pub fn decoded_signature(&self) -> &[u8] {
        &self.decoded_signature
    }

    pub fn signature_valid(&self) -> bool {
        self.signature_valid
    }

    pub fn claims_valid(&self) -> bool {
        self.claims_valid
    }

    /// JWS signing input: the still-encoded `header.body`
    pub fn signing_input(&self) -> Vec<u8> {
        let mut input = Vec::with_capacity(self.raw_header.len() + 1 + self.raw_body.len());
        input.extend_from_slice(&self.raw_header);
        input.push(b'.');
        input.extend_from_slice(&self.raw_body);
        input
    }

    /// Deserialize the decoded header into a caller-defined type
    pub fn header_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.decoded_header)?)
    }

    /// Deserialize the decoded body into a caller-defined type
    ///
    /// Nothing here checks the signature; prefer this after verification.
    pub fn claims_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.decoded_body)?)
    }

    fn advance(&mut self, stage: TokenStage) {
        debug_assert!(stage > self.stage, "{:?} -> {:?}", self.stage, stage);
        self.stage = self.stage.max(stage);
    }

    pub(crate) fn mark_parsed(&mut self) {
        self.advance(TokenStage::Parsed);
    }

    pub(crate) fn bind_header(&mut self) -> Result<()> {
        let header: Header = self.header_as()?;
        self.algorithm = header.parse_algorithm().ok();
        self.header = Some(header);
        self.advance(TokenStage::HeaderBound);
        Ok(())
    }

    pub(crate) fn record_signature(&mut self, valid: bool) {
        self.signature_valid = valid;
        self.advance(TokenStage::SignatureChecked);
    }

    pub(crate) fn bind_claims(&mut self) -> Result<&Claims> {
        let claims: Claims = self.claims_as()?;
        self.advance(TokenStage::ClaimsBound);
        Ok(self.claims.insert(claims))
    }

    pub(crate) fn record_claims(&mut self, valid: bool) {
        self.claims_valid = valid;
        self.advance(TokenStage::ClaimsChecked);
    }
}
