//! fraud-sim - synthetic card transaction generator
//!
//! Runs the orchestrator for a fixed number of records and writes them as CSV.

mod sink;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fraud_sim_core_rs::{Orchestrator, OrchestratorConfig};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "fraud-sim", version, about = "Synthetic card transaction generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate transactions to a CSV file (or stdout)
    Generate {
        #[command(flatten)]
        settings: Settings,

        /// Number of records to emit
        #[arg(short = 'n', long, default_value_t = 100_000)]
        records: u64,

        /// Output path; `-` writes to stdout
        #[arg(short, long, default_value = "transactions.csv")]
        output: PathBuf,
    },

    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        settings: Settings,
    },
}

#[derive(Debug, Args)]
struct Settings {
    /// JSON configuration file (missing fields take defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Master seed, overriding the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of users, overriding the config file
    #[arg(short, long)]
    users: Option<u32>,
}

impl Settings {
    fn resolve(&self) -> Result<OrchestratorConfig> {
        let mut config = match &self.config {
            Some(path) => OrchestratorConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => OrchestratorConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.rng_seed = Some(seed);
        }
        if let Some(users) = self.users {
            config.num_users = users;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so CSV can stream to stdout
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fraud_sim=info".parse()?)
                .add_directive("fraud_sim_core_rs=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            settings,
            records,
            output,
        } => generate(&settings, records, &output),
        Command::Config { settings } => {
            let config = settings.resolve()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn generate(settings: &Settings, records: u64, output: &Path) -> Result<()> {
    let config = settings.resolve()?;
    let mut orchestrator = Orchestrator::new(config).context("failed to build simulation")?;

    if !orchestrator.is_reproducible() {
        warn!("no seed configured; this run cannot be reproduced");
    }
    info!(
        users = orchestrator.config().num_users,
        fraud_users = orchestrator.num_fraud_users(),
        streams = orchestrator.num_streams(),
        config_hash = orchestrator.config_hash(),
        records,
        "starting generation"
    );

    let writer: Box<dyn Write> = if output.as_os_str() == "-" {
        Box::new(BufWriter::new(io::stdout().lock()))
    } else {
        let file = File::create(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        Box::new(BufWriter::new(file))
    };

    let summary = sink::write_records(&mut orchestrator, records, writer)?;

    info!(
        records = summary.records,
        fraud_records = summary.fraud_records,
        final_time = orchestrator.current_time().unwrap_or_default(),
        output = %output.display(),
        "generation complete"
    );
    Ok(())
}
