//! Server records and the limit-edit payloads exchanged with the panel.

use serde::{Deserialize, Serialize};

use super::resources::{ResourceSet, Violations};

/// One hosted server as returned by the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    /// Server identifier (opaque to this client).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lifecycle status string, e.g. `"running"` or `"suspended"`.
    pub status: String,
    /// Resource limits currently assigned to this server.
    pub limits: ResourceSet,
}

/// The in-progress form values for a limit edit.
///
/// Seeded from the server record when the edit session loads, mutated
/// by the caller, and discarded with the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedLimits {
    /// Proposed server name; must be non-empty after trimming.
    pub name: String,
    /// Proposed resource limits.
    pub limits: ResourceSet,
}

impl ProposedLimits {
    /// Seed the proposal from an existing server record.
    pub fn from_record(record: &ServerRecord) -> Self {
        Self {
            name: record.name.clone(),
            limits: record.limits,
        }
    }

    /// Whether the proposed name is non-empty once trimmed.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// PATCH body submitted to the server mutation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerUpdate {
    /// New display name.
    pub name: String,
    /// New resource limits.
    pub limits: ResourceSet,
}

impl From<&ProposedLimits> for ServerUpdate {
    fn from(proposed: &ProposedLimits) -> Self {
        Self {
            name: proposed.name.trim().to_string(),
            limits: proposed.limits,
        }
    }
}

/// Result of a server mutation request.
///
/// Structured per-field rejections are data, not transport errors; the
/// caller merges them into its violation display and lets the user
/// edit and resubmit.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// The panel accepted the update and returned the new record.
    Applied(ServerRecord),
    /// The panel rejected the update with per-field violations.
    Rejected(Violations),
}
