//! goerd CLI - entity-relationship diagrams for Go types.
//!
//! Usage:
//!   goerd --path ./pkg | dot -Tsvg > out.svg   # DOT to stdout
//!   goerd --path ./pkg --format json           # graph document as JSON
//!   goerd --path ./pkg --http 127.0.0.1:8080   # serve /graph over HTTP

use anyhow::Result;
use clap::Parser;
use goerd::cli::{self, Cli};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config, invalid) = match cli.read_config() {
        Ok(config) => (config, None),
        Err(e) => (Default::default(), Some(e)),
    };

    // Diagnostics go to stderr; stdout carries only the graph.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .init();

    if let Some(e) = invalid {
        warn!(error = %e, "using default config");
    }

    cli::run(&cli, &config)?;
    Ok(())
}
