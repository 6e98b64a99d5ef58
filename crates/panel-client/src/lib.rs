//! # panel-client
//!
//! HTTP implementation of [`panel_core::PanelApi`] over the panel's
//! REST API: three read endpoints and one mutation endpoint, bearer
//! authenticated, JSON bodies deserialized at the boundary.
//!
//! No retries, no caching, no request coalescing; a failed call
//! surfaces immediately and the caller decides what to do.

pub mod client;
pub mod wire;

pub use client::HttpPanelClient;
