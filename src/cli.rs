//! CLI argument parsing for the enrichment workflow.
use crate::component::MetadataEntry;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "mdenrich",
    version,
    about = "Enrich metadata components with generated descriptions",
    after_help = concat!(
        "Examples:\n",
        "  mdenrich enrich -m LightningComponentBundle:myCard\n",
        "  mdenrich enrich -m LightningComponentBundle:* --json\n",
        "  mdenrich enrich -m LightningComponentBundle:myCard ApexClass:Util \\\n",
        "      --report enrich-report.json"
    ),
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logs (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Enrich(EnrichArgs),
}

/// Enrich command inputs.
#[derive(Parser, Debug)]
#[command(about = "Enrich metadata components and write descriptions into their descriptors")]
pub struct EnrichArgs {
    /// Components to enrich, as Type:Name, Type:*, or Type
    #[arg(
        long,
        short = 'm',
        value_name = "ENTRY",
        required = true,
        num_args = 1..,
        value_parser = parse_metadata_entry
    )]
    pub metadata: Vec<String>,

    /// Project root containing sfdx-project.json (default: nearest ancestor)
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Config file (default: <project>/.mdenrich/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Local enricher command; overrides the HTTP service
    #[arg(long, value_name = "CMD")]
    pub enricher: Option<String>,

    /// Emit outcome metrics as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Write the full run report (records + metrics) to a JSON file
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

fn parse_metadata_entry(raw: &str) -> Result<String, String> {
    match MetadataEntry::parse(raw) {
        Some(_) => Ok(raw.trim().to_string()),
        None => Err(format!("expected Type:Name, Type:*, or Type (got {raw:?})")),
    }
}
