//! Convenience result type alias for HostPanel.

use crate::error::PanelError;

/// A specialized `Result` type for HostPanel operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, PanelError>` explicitly.
pub type PanelResult<T> = Result<T, PanelError>;
