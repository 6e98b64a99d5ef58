//! Quota display CLI command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use panel_core::error::PanelError;
use panel_core::traits::PanelApi;
use panel_core::types::ResourceField;
use panel_quota::remaining_capacity;

use crate::output::{self, OutputFormat};

/// Arguments for `quota`
#[derive(Debug, Args)]
pub struct QuotaArgs {
    /// Also show capacity available for editing this server's limits
    #[arg(long)]
    pub server: Option<String>,
}

/// Per-resource quota display row
#[derive(Debug, Serialize, Tabled)]
struct QuotaRow {
    /// Resource
    resource: String,
    /// Entitled
    entitled: u64,
    /// In use
    in_use: u64,
    /// Editable headroom (only with --server)
    available: String,
}

/// Execute the quota command
pub async fn execute(
    args: &QuotaArgs,
    api: &impl PanelApi,
    format: OutputFormat,
) -> Result<(), PanelError> {
    let (entitlement, usage) = tokio::try_join!(api.fetch_entitlement(), api.fetch_aggregate_usage())?;

    let remaining = match &args.server {
        Some(id) => {
            let server = api.fetch_server(id).await?;
            Some(remaining_capacity(&entitlement, &usage, &server.limits))
        }
        None => None,
    };

    let rows: Vec<QuotaRow> = ResourceField::ALL
        .into_iter()
        .map(|field| QuotaRow {
            resource: match field.unit() {
                "" => field.label().to_string(),
                unit => format!("{} ({})", field.label(), unit),
            },
            entitled: entitlement.get(field),
            in_use: usage.get(field),
            available: remaining
                .map(|r| r.get(field).to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
