//! CLI module for goerd.
//!
//! Modes:
//! - one-shot: render the graph of `--path` to stdout or `--output`
//! - server: `--http host:port` serves the graph over HTTP

use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{GoerdConfig, CONFIG_FILE};
use crate::error::{GoerdError, Result};
use crate::graph::{inspect_dir, render_graph, GraphDocument};
use crate::server::{self, ServerState};

#[derive(Debug, Parser)]
#[command(name = "goerd")]
#[command(about = "Entity-relationship diagrams for Go types")]
#[command(
    after_help = "Example:\n  goerd --path ./pkg/model | dot -Tsvg > model.svg"
)]
pub struct Cli {
    /// Directory of Go sources to analyze
    #[arg(short, long)]
    pub path: PathBuf,

    /// Serve the graph over HTTP on host:port instead of printing it
    #[arg(long, value_name = "HOST:PORT")]
    pub http: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Dot)]
    pub format: Format,

    /// Write the graph to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Graphviz DOT
    Dot,
    /// The graph document as JSON
    Json,
}

impl Cli {
    /// Read `--config`; a missing file yields the defaults.
    pub fn read_config(&self) -> Result<GoerdConfig> {
        GoerdConfig::read(&self.config)
    }
}

/// Run one invocation with an already loaded config.
pub fn run(cli: &Cli, config: &GoerdConfig) -> Result<()> {
    if let Some(addr) = &cli.http {
        return serve(cli, config, addr);
    }

    // The output file is only touched once the whole directory parsed.
    let doc = build_document(cli, config)?;
    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| GoerdError::io(path, e))?;
            let mut out = BufWriter::new(file);
            write_document(&doc, cli.format, &mut out)?;
            out.flush()?;
            info!(output = %path.display(), "graph written");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_document(&doc, cli.format, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Inspect `cli.path` and write the graph in the selected format.
pub fn render_to<W: Write>(cli: &Cli, config: &GoerdConfig, out: &mut W) -> Result<()> {
    let doc = build_document(cli, config)?;
    write_document(&doc, cli.format, out)
}

/// Inspect `cli.path` and render its graph document.
pub fn build_document(cli: &Cli, config: &GoerdConfig) -> Result<GraphDocument> {
    let table = inspect_dir(&cli.path)?;
    info!(
        packages = table.package_count(),
        types = table.declaration_count(),
        "collected declarations"
    );
    Ok(render_graph(&table).with_name(config.graph.name.clone()))
}

fn write_document<W: Write>(doc: &GraphDocument, format: Format, out: &mut W) -> Result<()> {
    match format {
        Format::Dot => doc.write_dot(out)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, doc)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn serve(cli: &Cli, config: &GoerdConfig, addr: &str) -> Result<()> {
    let state = ServerState {
        source: absolute(&cli.path),
        graph_name: config.graph.name.clone(),
    };
    let runtime = tokio::runtime::Runtime::new().map_err(GoerdError::Serve)?;
    runtime.block_on(server::serve(addr, state, &config.server))
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
