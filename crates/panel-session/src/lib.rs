//! # panel-session
//!
//! One limit-edit session: load the three quota snapshots, let the
//! caller mutate the proposed limits, recompute diagnostics on every
//! change, and drive the single submit through the panel API.
//!
//! ```text
//! load() ──► Ready ──► Saving ──► Saved          (terminal)
//!              ▲          │
//!              │          └────► SaveFailed ──► Ready (on edit)
//!              └── edits ──┘
//! ```
//!
//! A failed load never constructs a session; any of the three reads
//! failing aborts the whole load with that error.

pub mod session;

pub use session::{EditSession, EditState};
