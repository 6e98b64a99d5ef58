//! # panel-core
//!
//! Core crate for HostPanel. Contains the resource/violation domain
//! types, configuration schemas, the [`PanelApi`] trait, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other HostPanel crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::PanelError;
pub use result::PanelResult;
pub use traits::PanelApi;
