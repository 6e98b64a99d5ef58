//! Trait seams between pure panel logic and its collaborators.

pub mod api;

pub use api::PanelApi;
