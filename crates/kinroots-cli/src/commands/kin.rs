//! Kinship query commands

use clap::{Args, Subcommand};

use crate::{AppContext, Cli};
use kinroots_core::{KinshipGraph, Lineage, Person};
use kinroots_translate::{GeminiClassifier, Translator};

/// Message shown when two members share no recorded connection
const NO_CONNECTION: &str = "No direct family connection found in the current database.";

#[derive(Args)]
pub struct KinArgs {
    #[command(subcommand)]
    pub command: KinCommands,
}

#[derive(Subcommand)]
pub enum KinCommands {
    /// Show the shortest relationship path between two members
    Path {
        /// Starting member (id or full name)
        from: String,
        /// Target member (id or full name)
        to: String,
    },
    /// Resolve the kinship term between two members
    Term {
        /// Starting member (id or full name)
        from: String,
        /// Target member (id or full name)
        to: String,
        /// Gemini model override
        #[arg(long)]
        model: Option<String>,
    },
}

pub async fn run(args: &KinArgs, _cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    match &args.command {
        KinCommands::Path { from, to } => {
            let lineage = ctx.store.load_lineage().await?;
            let (Some(start), Some(end)) = (resolve(&lineage, from), resolve(&lineage, to))
            else {
                return Ok(());
            };

            let graph = KinshipGraph::new(&lineage);
            match graph.find_path(&start.id, &end.id) {
                Some(path) if path.is_empty() => println!("Same person."),
                Some(path) => {
                    println!(
                        "Path from '{}' to '{}' ({} {}):",
                        start.full_name(),
                        end.full_name(),
                        path.hops(),
                        if path.hops() == 1 { "hop" } else { "hops" }
                    );
                    for (i, step) in path.iter().enumerate() {
                        let name = lineage
                            .find(&step.person_id)
                            .map(|p| p.full_name())
                            .unwrap_or_else(|| "(no record)".to_string());
                        println!("  {}. {} -> {} [{}]", i + 1, step.relation, name, step.person_id);
                    }
                }
                None => println!("{}", NO_CONNECTION),
            }
        }
        KinCommands::Term { from, to, model } => {
            let lineage = ctx.store.load_lineage().await?;
            let (Some(start), Some(end)) = (resolve(&lineage, from), resolve(&lineage, to))
            else {
                return Ok(());
            };

            let graph = KinshipGraph::new(&lineage);
            let Some(path) = graph.find_path(&start.id, &end.id) else {
                println!("{}", NO_CONNECTION);
                return Ok(());
            };

            let Ok(key) = std::env::var("GEMINI_API_KEY") else {
                println!("GEMINI_API_KEY not set; cannot resolve a kinship term.");
                return Ok(());
            };

            let mut classifier = GeminiClassifier::new(key)?;
            if let Some(model) = model.as_ref().or(ctx.config.gemini_model.as_ref()) {
                classifier = classifier.with_model(model);
            }

            tracing::info!(
                "Resolving kinship term between {} and {}",
                start.full_name(),
                end.full_name()
            );

            let translator = Translator::new(classifier);
            let term = translator.describe(&lineage, start, end, &path).await;
            println!("{}", term);
        }
    }

    Ok(())
}

/// Resolve a member reference: exact id first, then unique full-name match
fn resolve<'a>(lineage: &'a Lineage, reference: &str) -> Option<&'a Person> {
    if let Some(person) = lineage.find(&reference.into()) {
        return Some(person);
    }

    let matches: Vec<&Person> = lineage
        .iter()
        .filter(|p| p.full_name().eq_ignore_ascii_case(reference))
        .collect();

    match matches.as_slice() {
        [] => {
            println!("No member matching '{}'", reference);
            None
        }
        [person] => Some(person),
        _ => {
            println!("'{}' is ambiguous; use an id:", reference);
            for person in matches {
                println!("  {} [{}]", person.full_name(), person.id);
            }
            None
        }
    }
}
