//! # goerd
//!
//! Entity-relationship diagrams for Go types.
//!
//! goerd reads the type declarations of a Go package directory and emits a
//! Graphviz graph: one node per named type, one edge per reference from a
//! type's definition to another type declared in the same package.
//!
//! ## Pipeline
//!
//! - **Parse**: every `*.go` file of the directory with tree-sitter
//! - **Collect**: top-level type declarations into a [`PackageTable`]
//! - **Render**: the table into a [`GraphDocument`], written as DOT
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use goerd::{inspect_dir, render_graph};
//! use std::path::Path;
//!
//! let table = inspect_dir(Path::new("./pkg/model")).unwrap();
//! let doc = render_graph(&table);
//! doc.write_dot(&mut std::io::stdout()).unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod parser;
pub mod server;

// Re-exports for convenience
pub use config::GoerdConfig;
pub use error::{GoerdError, Result};

// Graph re-exports
pub use graph::{
    collect_declarations, escape_label, inspect_dir, references_of, render_dir, render_graph,
    signature_of, write_graph, Declaration, Edge, Field, GraphDocument, Label, Node, NodeShape, PackageTable,
    TypeExpr,
};
pub use parser::{parse_source, ParsedFile, SourceItem};
