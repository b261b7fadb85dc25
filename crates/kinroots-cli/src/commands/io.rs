//! Import/Export commands

use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{AppContext, Cli};
use kinroots_core::{Lineage, Person};

const EXPORT_VERSION: &str = "1";

#[derive(Args)]
pub struct ImportArgs {
    /// Input file (JSON format)
    pub file: PathBuf,

    /// Merge with existing data (default: replace the stored snapshot)
    #[arg(long)]
    pub merge: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Versioned exchange format for lineage snapshots
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub version: String,
    pub people: Vec<Person>,
}

pub async fn run_import(args: &ImportArgs, _cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::info!("Importing from {:?}", args.file);

    let content = std::fs::read_to_string(&args.file)?;
    let data: ExportData = serde_json::from_str(&content)?;

    tracing::debug!("Import format version: {}", data.version);

    let count = data.people.len();
    let lineage = if args.merge {
        let mut existing = ctx.store.load_lineage().await?;
        for person in data.people {
            existing.upsert(person);
        }
        existing
    } else {
        Lineage::from_people(data.people)
    };

    ctx.store.save_lineage(&lineage).await?;

    println!(
        "Imported {} people ({} now recorded)",
        count,
        lineage.len()
    );
    Ok(())
}

pub async fn run_export(args: &ExportArgs, _cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let lineage = ctx.store.load_lineage().await?;
    let data = ExportData {
        version: EXPORT_VERSION.to_string(),
        people: lineage.people,
    };

    let json = serde_json::to_string_pretty(&data)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("Exported {} people to {:?}", data.people.len(), path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
