//! # panel-quota
//!
//! The quota reconciliation engine: given a user's total entitlement,
//! their aggregate usage across all servers, and the limits of the one
//! server being edited, decide how far that server's limits may grow
//! and produce per-field diagnostics for anything out of bounds.
//!
//! Everything here is a pure function over snapshots; the panel API
//! remains authoritative and may still reject a proposal the client
//! considered valid.

pub mod minimums;
pub mod reconcile;
pub mod violations;

pub use minimums::PLATFORM_MINIMUMS;
pub use reconcile::{exceeded_fields, remaining_capacity};
pub use violations::{is_submittable, merge_violations, minimum_violations};
