//! Command-line front end for the farm aggregation core.
//!
//! Loads the farm registry from a YAML config, runs one dispatch across the
//! selected farms and prints the per-farm outcome map as JSON. The real
//! HTTP surface lives elsewhere; this binary exists so the core is runnable
//! and scriptable on its own.

use anyhow::Context;
use clap::{Parser, Subcommand};
use dispatch::{Config, Dispatcher, Operation, StaticDirectory};
use farm_client::{RecordPayload, ResourceKind};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "aggregator",
    about = "Fan one operation out across registered farm servers"
)]
struct Cli {
    /// Path to the YAML file listing registered farms
    #[arg(long, short, default_value = "aggregator.yaml")]
    config: PathBuf,

    /// Farm ids to target (comma separated); all registered farms if omitted
    #[arg(long, value_delimiter = ',')]
    farms: Vec<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Server metadata from each selected farm
    Info,
    /// Filtered listing of one resource collection
    Get {
        /// Resource collection: log, asset, term or area
        kind: ResourceKind,
        /// Filter passed through to the farms verbatim, as key=value
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Create a record on every selected farm
    Create {
        kind: ResourceKind,
        /// The record as inline JSON; must carry a name
        record: String,
    },
    /// Update a record on every selected farm
    Update {
        kind: ResourceKind,
        /// The record as inline JSON; must carry the target id
        record: String,
    },
    /// Delete a record by id on every selected farm
    Delete { kind: ResourceKind, id: i64 },
}

impl Command {
    fn into_operation(self) -> anyhow::Result<Operation> {
        let operation = match self {
            Command::Info => Operation::Info,
            Command::Get { kind, filters } => Operation::Get {
                kind,
                filters: filters.into_iter().collect(),
            },
            Command::Create { kind, record } => Operation::Create {
                kind,
                record: parse_record(&record)?,
            },
            Command::Update { kind, record } => Operation::Update {
                kind,
                record: parse_record(&record)?,
            },
            Command::Delete { kind, id } => Operation::Delete { kind, id },
        };
        Ok(operation)
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

fn parse_record(raw: &str) -> anyhow::Result<RecordPayload> {
    let value = serde_json::from_str(raw).context("record is not valid JSON")?;
    RecordPayload::from_value(value).context("record must be a JSON object")
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: Config =
        serde_yaml::from_str(&raw).context("failed to parse config")?;
    config.validate().context("invalid config")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let directory = StaticDirectory::from_config(&config);
    let dispatcher = Dispatcher::new(
        &directory,
        &directory,
        config.timeouts,
        config.max_concurrency,
    );

    let farm_ids = (!cli.farms.is_empty()).then_some(cli.farms.as_slice());
    let operation = cli.command.into_operation()?;
    tracing::info!(operation = operation.name(), "running dispatch");

    let response = dispatcher.dispatch(farm_ids, &operation).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
