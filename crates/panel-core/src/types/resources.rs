//! Resource quota dimensions tracked per user and per server.
//!
//! The panel API expresses every quota as the same six-field map; the
//! engine indexes it through [`ResourceField`] so per-field logic never
//! has to be written six times.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-field violation messages, keyed for deterministic display order.
pub type Violations = BTreeMap<ResourceField, String>;

/// One of the six quota dimensions tracked for every server.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ResourceField {
    /// Disk space in megabytes.
    DiskMb,
    /// Memory in megabytes.
    MemoryMb,
    /// CPU allowance in percent (100 = one full core).
    CpuPercent,
    /// Number of backup slots.
    Backups,
    /// Number of databases.
    Databases,
    /// Number of port allocations.
    Allocations,
}

impl ResourceField {
    /// All fields, in display order.
    pub const ALL: [ResourceField; 6] = [
        Self::DiskMb,
        Self::MemoryMb,
        Self::CpuPercent,
        Self::Backups,
        Self::Databases,
        Self::Allocations,
    ];

    /// The camelCase key the panel API uses for this field.
    pub fn api_key(&self) -> &'static str {
        match self {
            Self::DiskMb => "diskMb",
            Self::MemoryMb => "memoryMb",
            Self::CpuPercent => "cpuPercent",
            Self::Backups => "backups",
            Self::Databases => "databases",
            Self::Allocations => "allocations",
        }
    }

    /// Parse an API key back into a field. Unknown keys return `None`.
    pub fn from_api_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.api_key() == key)
    }

    /// Human-readable label for messages and table headers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DiskMb => "disk",
            Self::MemoryMb => "memory",
            Self::CpuPercent => "CPU",
            Self::Backups => "backups",
            Self::Databases => "databases",
            Self::Allocations => "allocations",
        }
    }

    /// Unit suffix for messages, empty for plain counts.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::DiskMb | Self::MemoryMb => "MB",
            Self::CpuPercent => "%",
            Self::Backups | Self::Databases | Self::Allocations => "",
        }
    }
}

impl std::fmt::Display for ResourceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A full set of resource quantities, one value per [`ResourceField`].
///
/// Used for entitlements, aggregate usage, per-server limits, and the
/// derived remaining capacity alike; which one it means is positional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSet {
    /// Disk space in megabytes.
    pub disk_mb: u64,
    /// Memory in megabytes.
    pub memory_mb: u64,
    /// CPU allowance in percent.
    pub cpu_percent: u64,
    /// Backup slots.
    pub backups: u64,
    /// Databases.
    pub databases: u64,
    /// Port allocations.
    pub allocations: u64,
}

impl ResourceSet {
    /// Read the value for one field.
    pub fn get(&self, field: ResourceField) -> u64 {
        match field {
            ResourceField::DiskMb => self.disk_mb,
            ResourceField::MemoryMb => self.memory_mb,
            ResourceField::CpuPercent => self.cpu_percent,
            ResourceField::Backups => self.backups,
            ResourceField::Databases => self.databases,
            ResourceField::Allocations => self.allocations,
        }
    }

    /// Write the value for one field.
    pub fn set(&mut self, field: ResourceField, value: u64) {
        match field {
            ResourceField::DiskMb => self.disk_mb = value,
            ResourceField::MemoryMb => self.memory_mb = value,
            ResourceField::CpuPercent => self.cpu_percent = value,
            ResourceField::Backups => self.backups = value,
            ResourceField::Databases => self.databases = value,
            ResourceField::Allocations => self.allocations = value,
        }
    }

    /// Build a set by evaluating `f` once per field.
    pub fn from_fn(mut f: impl FnMut(ResourceField) -> u64) -> Self {
        let mut set = Self::default();
        for field in ResourceField::ALL {
            set.set(field, f(field));
        }
        set
    }
}

/// Convert API-keyed violation messages into a typed map.
///
/// Unknown keys are dropped with a warning; the server may grow new
/// quota dimensions before this client learns about them.
pub fn violations_from_api(raw: std::collections::HashMap<String, String>) -> Violations {
    let mut out = Violations::new();
    for (key, message) in raw {
        match ResourceField::from_api_key(&key) {
            Some(field) => {
                out.insert(field, message);
            }
            None => {
                tracing::warn!(field = %key, "dropping violation for unknown resource field");
            }
        }
    }
    out
}
