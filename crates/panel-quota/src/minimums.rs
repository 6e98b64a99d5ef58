//! Platform-wide absolute floors for server resource limits.

use panel_core::types::ResourceSet;

/// The smallest limits any server may be assigned, regardless of how
/// much capacity the user has left. Fixed platform policy, not
/// configuration.
pub const PLATFORM_MINIMUMS: ResourceSet = ResourceSet {
    disk_mb: 100,
    memory_mb: 128,
    cpu_percent: 10,
    backups: 0,
    databases: 0,
    allocations: 1,
};
