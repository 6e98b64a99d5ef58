//! Per-field violation messages and the submit gate.

use std::collections::BTreeSet;

use panel_core::types::{ProposedLimits, ResourceField, ResourceSet, Violations};

use crate::minimums::PLATFORM_MINIMUMS;

/// Fields proposed below their platform minimum, with display messages.
///
/// Needs no network data; evaluable as soon as the form exists.
pub fn minimum_violations(proposed: &ResourceSet) -> Violations {
    let mut out = Violations::new();
    for field in ResourceField::ALL {
        let floor = PLATFORM_MINIMUMS.get(field);
        if proposed.get(field) < floor {
            out.insert(field, minimum_message(field, floor));
        }
    }
    out
}

fn minimum_message(field: ResourceField, floor: u64) -> String {
    let unit = field.unit();
    if unit.is_empty() {
        format!("Minimum {} is {}", field.label(), floor)
    } else {
        format!("Minimum {} is {} {}", field.label(), floor, unit)
    }
}

/// Merge panel-returned violations over client-side minimum violations.
///
/// The panel is authoritative: its capacity checks run against fresher
/// state than the client's snapshots, so for any field both sources
/// name, the panel's message wins. Fields only one source names are
/// kept from that source.
pub fn merge_violations(server: &Violations, client_minimums: &Violations) -> Violations {
    let mut merged = client_minimums.clone();
    for (field, message) in server {
        merged.insert(*field, message.clone());
    }
    merged
}

/// Whether the edit form may be submitted.
///
/// Requires all three prerequisite snapshots loaded, a non-empty
/// trimmed name, no field over remaining capacity, and no outstanding
/// violations.
pub fn is_submittable(
    proposed: &ProposedLimits,
    exceeded: &BTreeSet<ResourceField>,
    violations: &Violations,
    loaded: bool,
) -> bool {
    loaded && proposed.has_name() && exceeded.is_empty() && violations.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comfortable_limits() -> ResourceSet {
        ResourceSet {
            disk_mb: 1_000,
            memory_mb: 1_024,
            cpu_percent: 100,
            backups: 2,
            databases: 1,
            allocations: 1,
        }
    }

    #[test]
    fn test_cpu_minimum_is_boundary_inclusive() {
        let mut proposed = comfortable_limits();

        proposed.cpu_percent = 9;
        let violations = minimum_violations(&proposed);
        assert_eq!(
            violations[&ResourceField::CpuPercent],
            "Minimum CPU is 10 %"
        );

        proposed.cpu_percent = 10;
        assert!(minimum_violations(&proposed).is_empty());
    }

    #[test]
    fn test_countable_fields_have_no_unit_suffix() {
        let mut proposed = comfortable_limits();
        proposed.allocations = 0;

        let violations = minimum_violations(&proposed);
        assert_eq!(
            violations[&ResourceField::Allocations],
            "Minimum allocations is 1"
        );
    }

    #[test]
    fn test_zero_floors_never_violate() {
        let mut proposed = comfortable_limits();
        proposed.backups = 0;
        proposed.databases = 0;
        assert!(minimum_violations(&proposed).is_empty());
    }

    #[test]
    fn test_merge_prefers_server_message() {
        let mut server = Violations::new();
        server.insert(
            ResourceField::MemoryMb,
            "Exceeds available resources".to_string(),
        );

        let mut client = Violations::new();
        client.insert(ResourceField::MemoryMb, "Minimum memory is 128 MB".to_string());
        client.insert(ResourceField::DiskMb, "Minimum disk is 100 MB".to_string());

        let merged = merge_violations(&server, &client);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[&ResourceField::MemoryMb], "Exceeds available resources");
        assert_eq!(merged[&ResourceField::DiskMb], "Minimum disk is 100 MB");
    }

    #[test]
    fn test_merge_keeps_server_only_fields() {
        let mut server = Violations::new();
        server.insert(ResourceField::Backups, "Too many backups".to_string());

        let merged = merge_violations(&server, &Violations::new());
        assert_eq!(merged[&ResourceField::Backups], "Too many backups");
    }

    #[test]
    fn test_submit_requires_loaded() {
        let proposed = ProposedLimits {
            name: "lobby-1".to_string(),
            limits: comfortable_limits(),
        };
        let exceeded = BTreeSet::new();
        let violations = Violations::new();

        assert!(is_submittable(&proposed, &exceeded, &violations, true));
        assert!(!is_submittable(&proposed, &exceeded, &violations, false));
    }

    #[test]
    fn test_submit_requires_trimmed_name() {
        let proposed = ProposedLimits {
            name: "   ".to_string(),
            limits: comfortable_limits(),
        };
        assert!(!is_submittable(
            &proposed,
            &BTreeSet::new(),
            &Violations::new(),
            true
        ));
    }

    #[test]
    fn test_submit_blocked_by_exceeds_or_violations() {
        let proposed = ProposedLimits {
            name: "lobby-1".to_string(),
            limits: comfortable_limits(),
        };

        let mut exceeded = BTreeSet::new();
        exceeded.insert(ResourceField::DiskMb);
        assert!(!is_submittable(
            &proposed,
            &exceeded,
            &Violations::new(),
            true
        ));

        let mut violations = Violations::new();
        violations.insert(ResourceField::CpuPercent, "Minimum CPU is 10 %".to_string());
        assert!(!is_submittable(
            &proposed,
            &BTreeSet::new(),
            &violations,
            true
        ));
    }
}
