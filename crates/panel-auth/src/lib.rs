//! # panel-auth
//!
//! Session-token storage with an explicit lifecycle and client-side
//! JWT claims decoding for role display.
//!
//! Claims decoding here never verifies a signature; the panel re-checks
//! authorization on every request, and this crate only exists so the
//! client can show who is logged in and gate UI affordances.

pub mod jwt;
pub mod store;

pub use jwt::{Claims, Role, decode_claims};
pub use store::TokenStore;
