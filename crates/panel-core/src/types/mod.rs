//! Domain types shared by every HostPanel crate.

pub mod resources;
pub mod response;
pub mod server;

pub use resources::{ResourceField, ResourceSet, Violations, violations_from_api};
pub use response::ApiErrorResponse;
pub use server::{ProposedLimits, ServerRecord, ServerUpdate, UpdateOutcome};
