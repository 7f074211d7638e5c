//! Type graph module, the core of goerd.
//!
//! Provides the type-expression model, signature and reference extraction,
//! declaration collection, and rendering of the package table as a graph.

pub mod builder;
pub mod collector;
pub mod dot;
pub mod references;
pub mod render;
pub mod signature;
pub mod types;

pub use builder::{inspect_dir, parse_file, render_dir, source_files};
pub use collector::{collect_declarations, collect_file};
pub use dot::{write_dot, write_graph};
pub use references::{member_references, references_of};
pub use render::{
    anchored_references, node_for, node_id, render_graph, render_package, Edge, GraphDocument,
    Label, Node, NodeShape, Subgraph, DEFAULT_GRAPH_NAME,
};
pub use signature::{escape_label, field_signature, signature_of, LABEL_ESCAPES};
pub use types::{
    Declaration, Declarations, Field, PackageTable, RawShape, ShapeKind, TypeExpr,
};
