//! Error response body shapes returned by the panel API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Standard API error response body.
///
/// The mutation endpoint returns either a plain `error` string or a
/// `violations` map keyed by API field name; read endpoints only ever
/// return `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-field rejection messages, keyed by API field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<HashMap<String, String>>,
}
