use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod component;
mod config;
mod enrichment;
mod files;
mod messages;
mod metrics;
mod project;
mod records;
mod util;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Enrich(enrich_args) => workflow::run_enrich(enrich_args),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,mdenrich=debug"
    } else {
        "warn,mdenrich=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
