mod header;
mod parts;
#[allow(clippy::module_inception)]
mod token;

pub use header::Header;
pub use parts::get_raw_token_parts;
pub use token::{Token, TokenStage};
