//! Credential storage configuration.

use serde::{Deserialize, Serialize};

/// Credential storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Path to the JSON file holding the saved session token.
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

fn default_token_file() -> String {
    ".hostpanel/credentials.json".to_string()
}
