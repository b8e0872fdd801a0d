pub mod base64url;
pub mod digest;

pub use base64url::{decode, encode};
pub use digest::{hash, HashAlgorithm};
