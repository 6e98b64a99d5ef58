//! The limit-edit session and its state machine.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use panel_core::error::PanelError;
use panel_core::result::PanelResult;
use panel_core::traits::PanelApi;
use panel_core::types::{
    ProposedLimits, ResourceField, ResourceSet, ServerRecord, ServerUpdate, UpdateOutcome,
    Violations,
};
use panel_quota::{exceeded_fields, merge_violations, minimum_violations, remaining_capacity};

/// Where the edit session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// Snapshots loaded; the form may be edited and submitted.
    Ready,
    /// A submit is in flight; no second submit is accepted.
    Saving,
    /// The panel accepted the update. Terminal.
    Saved,
    /// The last submit was rejected or failed; editing returns to
    /// [`EditState::Ready`].
    SaveFailed,
}

/// One edit session for one server's resource limits.
///
/// Constructed by [`EditSession::load`], which joins the three
/// prerequisite reads; the session only exists once all three have
/// succeeded, so every diagnostic here is computed against complete
/// snapshots. The snapshots are not refreshed for the life of the
/// session — the panel remains authoritative on submit.
pub struct EditSession {
    api: Arc<dyn PanelApi>,
    server_id: String,
    entitlement: ResourceSet,
    aggregate_usage: ResourceSet,
    server: ServerRecord,
    /// Derived once from the three snapshots above.
    remaining: ResourceSet,
    proposed: ProposedLimits,
    state: EditState,
    /// Per-field rejections from the last submit, kept until the field
    /// is edited.
    server_violations: Violations,
    /// One-shot message from a generic (unstructured) submit failure.
    last_error: Option<String>,
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("server_id", &self.server_id)
            .field("entitlement", &self.entitlement)
            .field("aggregate_usage", &self.aggregate_usage)
            .field("server", &self.server)
            .field("remaining", &self.remaining)
            .field("proposed", &self.proposed)
            .field("state", &self.state)
            .field("server_violations", &self.server_violations)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl EditSession {
    /// Load an edit session for one server.
    ///
    /// The entitlement, aggregate usage, and server record are fetched
    /// concurrently and awaited jointly; the first failure aborts the
    /// load and surfaces as the page-level error.
    pub async fn load(api: Arc<dyn PanelApi>, server_id: impl Into<String>) -> PanelResult<Self> {
        let server_id = server_id.into();

        let (entitlement, aggregate_usage, server) = tokio::try_join!(
            api.fetch_entitlement(),
            api.fetch_aggregate_usage(),
            api.fetch_server(&server_id),
        )?;

        let remaining = remaining_capacity(&entitlement, &aggregate_usage, &server.limits);
        let proposed = ProposedLimits::from_record(&server);

        debug!(server = %server_id, ?remaining, "edit session loaded");

        Ok(Self {
            api,
            server_id,
            entitlement,
            aggregate_usage,
            server,
            remaining,
            proposed,
            state: EditState::Ready,
            server_violations: Violations::new(),
            last_error: None,
        })
    }

    /// Current state.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// The server record as of load (or as returned by a successful
    /// submit).
    pub fn server(&self) -> &ServerRecord {
        &self.server
    }

    /// The user's total entitlement snapshot.
    pub fn entitlement(&self) -> &ResourceSet {
        &self.entitlement
    }

    /// The aggregate usage snapshot across all of the user's servers.
    pub fn aggregate_usage(&self) -> &ResourceSet {
        &self.aggregate_usage
    }

    /// Capacity available to this server once its own allocation is
    /// excluded from the aggregate usage.
    pub fn remaining(&self) -> &ResourceSet {
        &self.remaining
    }

    /// The in-progress form values.
    pub fn proposed(&self) -> &ProposedLimits {
        &self.proposed
    }

    /// Change the proposed server name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.touch();
        self.proposed.name = name.into();
    }

    /// Change one proposed limit. Clears any panel-returned violation
    /// for that field; the next submit re-checks it.
    pub fn set_limit(&mut self, field: ResourceField, value: u64) {
        self.touch();
        self.server_violations.remove(&field);
        self.proposed.limits.set(field, value);
    }

    /// An edit after a failed save returns the session to `Ready` and
    /// drops the one-shot error.
    fn touch(&mut self) {
        self.last_error = None;
        if self.state == EditState::SaveFailed {
            self.state = EditState::Ready;
        }
    }

    /// Fields currently proposed above remaining capacity.
    pub fn exceeded(&self) -> BTreeSet<ResourceField> {
        exceeded_fields(&self.proposed.limits, &self.remaining)
    }

    /// Current per-field violations: client minimum checks merged with
    /// any panel-returned rejections (the panel's message wins where
    /// both name a field).
    pub fn violations(&self) -> Violations {
        merge_violations(
            &self.server_violations,
            &minimum_violations(&self.proposed.limits),
        )
    }

    /// Whether the form may be submitted right now.
    pub fn is_submittable(&self) -> bool {
        let state_allows = matches!(self.state, EditState::Ready | EditState::SaveFailed);
        state_allows
            && panel_quota::is_submittable(&self.proposed, &self.exceeded(), &self.violations(), true)
    }

    /// Take the one-shot error message from a generic submit failure.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Submit the proposed name and limits.
    ///
    /// At most one submit is in flight: a second call while `Saving`
    /// (or after `Saved`) is rejected with a conflict and never reaches
    /// the panel. An unsubmittable form is rejected locally with a
    /// validation error.
    pub async fn submit(&mut self) -> PanelResult<UpdateOutcome> {
        match self.state {
            EditState::Saving => {
                return Err(PanelError::conflict("A save is already in progress"));
            }
            EditState::Saved => {
                return Err(PanelError::conflict("This edit session is already saved"));
            }
            EditState::Ready | EditState::SaveFailed => {}
        }

        if !self.is_submittable() {
            return Err(PanelError::validation(
                "The form has outstanding violations or an empty name",
            ));
        }

        self.state = EditState::Saving;
        let update = ServerUpdate::from(&self.proposed);

        match self.api.update_server(&self.server_id, &update).await {
            Ok(UpdateOutcome::Applied(record)) => {
                debug!(server = %self.server_id, "limits saved");
                self.server = record.clone();
                self.state = EditState::Saved;
                Ok(UpdateOutcome::Applied(record))
            }
            Ok(UpdateOutcome::Rejected(violations)) => {
                warn!(server = %self.server_id, count = violations.len(), "panel rejected limits");
                self.server_violations = violations.clone();
                self.state = EditState::SaveFailed;
                Ok(UpdateOutcome::Rejected(violations))
            }
            Err(e) => {
                warn!(server = %self.server_id, error = %e, "save failed");
                self.last_error = Some(e.message.clone());
                self.state = EditState::SaveFailed;
                Err(e)
            }
        }
    }
}
