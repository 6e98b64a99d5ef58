//! Server inspection and limit-editing CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use panel_client::HttpPanelClient;
use panel_core::error::PanelError;
use panel_core::traits::PanelApi;
use panel_core::types::{ResourceField, UpdateOutcome};
use panel_session::EditSession;

use crate::output::{self, OutputFormat};

/// Arguments for server commands
#[derive(Debug, Args)]
pub struct ServerArgs {
    /// Server subcommand
    #[command(subcommand)]
    pub command: ServerCommand,
}

/// Server subcommands
#[derive(Debug, Subcommand)]
pub enum ServerCommand {
    /// Show one server's name, status, and limits
    Show {
        /// Server ID
        id: String,
    },
    /// Edit a server's name and resource limits
    Edit(EditArgs),
}

/// Arguments for `server edit`
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Server ID
    pub id: String,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New disk limit in MB
    #[arg(long)]
    pub disk_mb: Option<u64>,

    /// New memory limit in MB
    #[arg(long)]
    pub memory_mb: Option<u64>,

    /// New CPU limit in percent
    #[arg(long)]
    pub cpu_percent: Option<u64>,

    /// New backup slot count
    #[arg(long)]
    pub backups: Option<u64>,

    /// New database count
    #[arg(long)]
    pub databases: Option<u64>,

    /// New allocation count
    #[arg(long)]
    pub allocations: Option<u64>,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

impl EditArgs {
    /// Flag value for one field, if given.
    fn limit_for(&self, field: ResourceField) -> Option<u64> {
        match field {
            ResourceField::DiskMb => self.disk_mb,
            ResourceField::MemoryMb => self.memory_mb,
            ResourceField::CpuPercent => self.cpu_percent,
            ResourceField::Backups => self.backups,
            ResourceField::Databases => self.databases,
            ResourceField::Allocations => self.allocations,
        }
    }
}

/// Per-field edit preview row
#[derive(Debug, Serialize, Tabled)]
struct LimitRow {
    /// Resource
    resource: String,
    /// Current
    current: u64,
    /// Proposed
    proposed: u64,
    /// Remaining capacity
    remaining: u64,
    /// Status
    status: String,
}

/// Execute server commands
pub async fn execute(
    args: &ServerArgs,
    api: HttpPanelClient,
    format: OutputFormat,
) -> Result<(), PanelError> {
    match &args.command {
        ServerCommand::Show { id } => show(id, &api).await,
        ServerCommand::Edit(edit) => execute_edit(edit, api, format).await,
    }
}

async fn show(id: &str, api: &impl PanelApi) -> Result<(), PanelError> {
    let server = api.fetch_server(id).await?;

    output::print_kv("id", &server.id);
    output::print_kv("name", &server.name);
    output::print_kv("status", &server.status);
    for field in ResourceField::ALL {
        let value = server.limits.get(field);
        let suffix = field.unit();
        output::print_kv(field.label(), &format!("{value} {suffix}"));
    }
    Ok(())
}

async fn execute_edit(
    args: &EditArgs,
    api: HttpPanelClient,
    format: OutputFormat,
) -> Result<(), PanelError> {
    let api: Arc<dyn PanelApi> = Arc::new(api);
    let mut session = EditSession::load(api, &args.id).await?;

    if let Some(name) = &args.name {
        session.set_name(name.clone());
    }
    for field in ResourceField::ALL {
        if let Some(value) = args.limit_for(field) {
            session.set_limit(field, value);
        }
    }

    print_preview(&session, format);

    if !session.is_submittable() {
        let violations = session.violations();
        if !violations.is_empty() {
            output::print_violations(&violations);
        }
        for field in session.exceeded() {
            output::print_error(&format!(
                "{} exceeds the remaining capacity of {}",
                field.label(),
                session.remaining().get(field)
            ));
        }
        if !session.proposed().has_name() {
            output::print_error("The server name must not be empty");
        }
        return Err(PanelError::validation("Proposed limits are not submittable"));
    }

    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!("Apply these limits to {}?", session.server().name))
            .default(false)
            .interact()
            .map_err(|e| PanelError::internal(format!("Input error: {}", e)))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match session.submit().await? {
        UpdateOutcome::Applied(record) => {
            output::print_success(&format!("Limits for {} saved", record.name));
            Ok(())
        }
        UpdateOutcome::Rejected(_) => {
            // The panel's verdict supersedes the local preview.
            output::print_violations(&session.violations());
            Err(PanelError::validation("The panel rejected the proposed limits"))
        }
    }
}

fn print_preview(session: &EditSession, format: OutputFormat) {
    let exceeded = session.exceeded();
    let violations = session.violations();

    let rows: Vec<LimitRow> = ResourceField::ALL
        .into_iter()
        .map(|field| {
            let status = if exceeded.contains(&field) {
                "over capacity".to_string()
            } else if violations.contains_key(&field) {
                "below minimum".to_string()
            } else {
                "ok".to_string()
            };
            LimitRow {
                resource: field.label().to_string(),
                current: session.server().limits.get(field),
                proposed: session.proposed().limits.get(field),
                remaining: session.remaining().get(field),
                status,
            }
        })
        .collect();

    output::print_list(&rows, format);
}
