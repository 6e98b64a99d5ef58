//! The remote panel API, as seen by the reconciliation logic.

use async_trait::async_trait;

use crate::result::PanelResult;
use crate::types::{ResourceSet, ServerRecord, ServerUpdate, UpdateOutcome};

/// The four panel endpoints the quota engine depends on.
///
/// `panel-client` provides the HTTP implementation; tests script this
/// trait directly. The panel is authoritative for every check the
/// client also performs locally.
#[async_trait]
pub trait PanelApi: Send + Sync {
    /// Total resource entitlement granted to the authenticated user.
    async fn fetch_entitlement(&self) -> PanelResult<ResourceSet>;

    /// Sum of resource allocations across all of the user's servers.
    async fn fetch_aggregate_usage(&self) -> PanelResult<ResourceSet>;

    /// One server's current name, status, and limits.
    async fn fetch_server(&self, server_id: &str) -> PanelResult<ServerRecord>;

    /// Submit a new name and limit set for one server.
    ///
    /// Structured per-field rejections come back as
    /// [`UpdateOutcome::Rejected`]; transport and generic API failures
    /// are `Err`.
    async fn update_server(
        &self,
        server_id: &str,
        update: &ServerUpdate,
    ) -> PanelResult<UpdateOutcome>;
}
