//! Response envelopes specific to the panel's wire format.
//!
//! Everything is validated here, at the deserialization boundary; the
//! rest of the client never re-checks response shapes.

use serde::Deserialize;

use panel_core::types::{ResourceSet, ServerRecord};

/// `GET /api/client/account` response; the entitlement is nested under
/// the account user object.
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    /// The authenticated user.
    pub user: AccountUser,
}

/// The slice of the account user object this client reads.
#[derive(Debug, Deserialize)]
pub struct AccountUser {
    /// Total resource entitlement across all servers.
    pub resources: ResourceSet,
}

/// `PATCH /api/client/servers/{id}` success envelope.
#[derive(Debug, Deserialize)]
pub struct ServerEnvelope {
    /// The updated server record.
    pub server: ServerRecord,
}
