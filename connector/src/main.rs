use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use transsmart_connector::bootstrap::{self, Overrides};
use transsmart_connector::{Payload, TranssmartConnector};

/// Command-line access to the Transsmart shipment API.
///
/// Credentials default to TRANSSMART_ACCOUNT, TRANSSMART_USERNAME and
/// TRANSSMART_PASSWORD (a `.env` file is honoured). Responses are printed
/// as JSON on stdout.
#[derive(Debug, Parser)]
#[command(name = "transsmart", version)]
struct Cli {
    #[arg(long, global = true)]
    account: Option<String>,

    #[arg(long, global = true)]
    username: Option<String>,

    #[arg(long, global = true)]
    password: Option<String>,

    /// API host, e.g. the acceptance environment or a local mock
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Version segment of the shipments path
    #[arg(long, global = true)]
    api_version: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List shipments
    List {
        /// Query parameter as KEY=VALUE; repeatable
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Show one shipment
    Get { id: String },
    /// Create a shipment from a JSON file (`-` for stdin)
    Create { file: PathBuf },
    /// Update a shipment from a JSON file (`-` for stdin)
    Update { id: String, file: PathBuf },
    /// Delete a shipment
    Delete { id: String },
    /// Cancel a shipment
    Cancel { id: String },
    /// Fetch shipping labels
    Labels { id: String },
    /// Fetch shipment documents
    Documents { id: String },
    /// Show shipment status
    Status { id: String },
    /// Show track and trace events
    Track { id: String },
    /// List carriers available to the account
    Carriers,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

fn read_payload(path: &Path) -> Result<Payload> {
    let raw = if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("reading shipment from stdin")?;
        raw
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading shipment from {}", path.display()))?
    };
    serde_json::from_str(&raw).context("shipment is not valid JSON")
}

fn main() -> Result<()> {
    bootstrap::load_dotenv();
    bootstrap::init_tracing();
    let cli = Cli::parse();

    let config = bootstrap::config_with_overrides(Overrides {
        account: cli.account,
        username: cli.username,
        password: cli.password,
        base_url: cli.base_url,
        version: cli.api_version,
    })
    .context("incomplete configuration")?;
    let connector = TranssmartConnector::connect(config).context("logging in to Transsmart")?;

    let payload = match cli.command {
        Command::List { params } => connector.get_shipments(params.as_slice()),
        Command::Get { id } => connector.get_shipment(&id),
        Command::Create { file } => connector.create_shipment(&read_payload(&file)?),
        Command::Update { id, file } => connector.update_shipment(&id, &read_payload(&file)?),
        Command::Delete { id } => connector.delete_shipment(&id),
        Command::Cancel { id } => connector.cancel_shipment(&id),
        Command::Labels { id } => connector.get_labels(&id),
        Command::Documents { id } => connector.get_documents(&id),
        Command::Status { id } => connector.get_shipment_status(&id),
        Command::Track { id } => connector.get_track_and_trace(&id),
        Command::Carriers => connector.get_carriers(),
    }?;

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
