//! Login, logout, and identity CLI commands.

use clap::Args;

use panel_auth::{TokenStore, decode_claims};
use panel_core::error::PanelError;

use crate::output;

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Session token issued by the panel (copy from the web UI)
    #[arg(long)]
    pub token: String,
}

/// Save a session token, reporting who it belongs to.
pub fn login(args: &LoginArgs, tokens: &TokenStore) -> Result<(), PanelError> {
    let claims = decode_claims(&args.token)?;

    if claims.is_expired() {
        output::print_warning(&format!(
            "Token for {} expired at {}; the panel will reject it",
            claims.username,
            claims.expires_at()
        ));
    }

    tokens.set_token(&args.token)?;
    output::print_success(&format!(
        "Logged in as {} ({})",
        claims.username, claims.role
    ));
    Ok(())
}

/// Discard the saved session token.
pub fn logout(tokens: &TokenStore) -> Result<(), PanelError> {
    tokens.clear_token()?;
    output::print_success("Logged out");
    Ok(())
}

/// Show who the saved token belongs to.
pub fn whoami(tokens: &TokenStore) -> Result<(), PanelError> {
    let token = tokens
        .get_token()
        .ok_or_else(|| PanelError::authentication("Not logged in"))?;
    let claims = decode_claims(&token)?;

    output::print_kv("user", &claims.username);
    output::print_kv("id", &claims.sub);
    output::print_kv("role", &claims.role.to_string());
    output::print_kv(
        "expires",
        &format!(
            "{}{}",
            claims.expires_at(),
            if claims.is_expired() { " (expired)" } else { "" }
        ),
    );
    Ok(())
}
