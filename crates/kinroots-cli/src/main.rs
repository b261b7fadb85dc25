//! KinRoots CLI - Command line interface for the community lineage

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, io, kin, person, serve};
use kinroots_storage::LineageStore;

#[derive(Parser)]
#[command(name = "kinroots")]
#[command(author, version, about = "Community family tree and kinship finder")]
pub struct Cli {
    /// Data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<String>,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the data directory path
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("kinroots")
            })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage family members
    Person(person::PersonArgs),
    /// Kinship queries between two members
    Kin(kin::KinArgs),
    /// Import a lineage snapshot from JSON
    Import(io::ImportArgs),
    /// Export the lineage snapshot to JSON
    Export(io::ExportArgs),
    /// Start the shared lineage sync API
    Serve(serve::ServeArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the selected storage backend
pub struct AppContext {
    pub store: Arc<dyn LineageStore>,
    pub config: config::Config,
}

impl AppContext {
    pub async fn new(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = cli.data_dir();
        std::fs::create_dir_all(&data_dir)?;

        let config = config::Config::load(&data_dir.join("config.toml"))?;
        let store = Self::select_store(&data_dir, &config)?;

        Ok(Self { store, config })
    }

    /// Pick exactly one backend: remote when an endpoint is configured,
    /// the local database otherwise.
    fn select_store(
        data_dir: &std::path::Path,
        config: &config::Config,
    ) -> anyhow::Result<Arc<dyn LineageStore>> {
        if let Some(endpoint) = &config.endpoint {
            #[cfg(feature = "remote")]
            {
                tracing::debug!("Using remote lineage API at {}", endpoint);
                return Ok(Arc::new(kinroots_storage::HttpStore::new(endpoint)?));
            }
            #[cfg(not(feature = "remote"))]
            tracing::warn!(
                "Endpoint {} configured but the remote feature is not built; using local storage",
                endpoint
            );
        }

        let db_path = data_dir.join("kinroots.redb");
        tracing::debug!("Using database at: {:?}", db_path);
        Ok(Arc::new(kinroots_storage::RedbStore::open(&db_path)?))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting kinroots CLI");

    if let Commands::Completions(args) = &cli.command {
        return completions::run(args);
    }

    let ctx = AppContext::new(&cli).await?;

    match &cli.command {
        Commands::Person(args) => person::run(args, &cli, &ctx).await?,
        Commands::Kin(args) => kin::run(args, &cli, &ctx).await?,
        Commands::Import(args) => io::run_import(args, &cli, &ctx).await?,
        Commands::Export(args) => io::run_export(args, &cli, &ctx).await?,
        Commands::Serve(args) => serve::run(args, &ctx).await?,
        Commands::Completions(_) => unreachable!("handled before storage init"),
    }

    Ok(())
}
