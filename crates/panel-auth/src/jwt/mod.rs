//! Client-side JWT handling.

pub mod claims;
pub mod decoder;

pub use claims::{Claims, Role};
pub use decoder::decode_claims;
