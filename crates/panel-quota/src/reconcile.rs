//! Remaining-capacity derivation and the exceeds check.

use std::collections::BTreeSet;

use panel_core::types::{ResourceField, ResourceSet};

/// Capacity still available to the server being edited.
///
/// Aggregate usage includes the edited server itself, so its current
/// allocation is subtracted out first; what is left over is what the
/// *other* servers consume, and the edited server may grow into
/// whatever the entitlement leaves beyond that:
///
/// ```text
/// other[f]     = max(0, usage[f] - current[f])
/// remaining[f] = max(0, entitlement[f] - other[f])
/// ```
///
/// Both subtractions saturate at zero. Usage momentarily exceeding the
/// entitlement (a stale read racing another edit) must not produce a
/// negative capacity.
pub fn remaining_capacity(
    entitlement: &ResourceSet,
    aggregate_usage: &ResourceSet,
    current_limits: &ResourceSet,
) -> ResourceSet {
    ResourceSet::from_fn(|field| {
        let other = aggregate_usage
            .get(field)
            .saturating_sub(current_limits.get(field));
        entitlement.get(field).saturating_sub(other)
    })
}

/// Fields where the proposal asks for more than the remaining capacity.
///
/// Strictly greater-than: proposing exactly the remaining capacity is
/// allowed. Callers must not evaluate this until all three snapshots
/// behind `remaining` have loaded, or the loading window produces
/// false positives.
pub fn exceeded_fields(proposed: &ResourceSet, remaining: &ResourceSet) -> BTreeSet<ResourceField> {
    ResourceField::ALL
        .into_iter()
        .filter(|&field| proposed.get(field) > remaining.get(field))
        .collect()
}
