//! Graph renderer: [`PackageTable`] to [`GraphDocument`].
//!
//! One node per declaration, one subgraph per package. Edges only leave
//! function, channel, interface and struct declarations, and only reach
//! names declared in the same package.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::references::{member_references, references_of};
use super::signature::{field_signature, signature_of};
use super::types::{Declaration, Declarations, Field, PackageTable, TypeExpr};

/// Name of the whole document when none is configured.
pub const DEFAULT_GRAPH_NAME: &str = "GoERD";

/// DOT shape of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeShape {
    #[serde(rename = "ellipse")]
    Ellipse,
    #[serde(rename = "box")]
    Box,
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "record")]
    Record,
    #[serde(rename = "Mrecord")]
    Mrecord,
    /// Declarations whose body is outside the modeled shapes.
    #[serde(rename = "note")]
    Note,
}

impl NodeShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::Ellipse => "ellipse",
            NodeShape::Box => "box",
            NodeShape::Rectangle => "rectangle",
            NodeShape::Record => "record",
            NodeShape::Mrecord => "Mrecord",
            NodeShape::Note => "note",
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unescaped label content of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Label {
    Text { text: String },
    /// A record: a title compartment followed by one anchored compartment
    /// per member. Compartment `i` is addressed as port `f<i>`.
    Record {
        title: String,
        compartments: Vec<String>,
    },
}

/// A node of the type graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Declared type name.
    pub name: String,
    pub shape: NodeShape,
    pub label: Label,
}

impl Node {
    /// Graph-wide node id, `node-<name>`.
    pub fn id(&self) -> String {
        node_id(&self.name)
    }
}

/// An edge from a declaration (optionally from one of its anchors) to
/// another declaration of the same package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub anchor: Option<usize>,
    pub target: String,
}

/// All nodes and edges of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgraph {
    pub package: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Subgraph {
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.name == name)
    }
}

/// The rendered type graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub name: String,
    pub subgraphs: Vec<Subgraph>,
}

impl GraphDocument {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn subgraph(&self, package: &str) -> Option<&Subgraph> {
        self.subgraphs.iter().find(|sub| sub.package == package)
    }

    pub fn node_count(&self) -> usize {
        self.subgraphs.iter().map(|sub| sub.nodes.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.subgraphs.iter().map(|sub| sub.edges.len()).sum()
    }
}

/// `node-<name>`
pub fn node_id(name: &str) -> String {
    format!("node-{name}")
}

/// Render every package of `table`.
pub fn render_graph(table: &PackageTable) -> GraphDocument {
    let subgraphs = table
        .packages()
        .map(|(package, decls)| render_package(package, decls))
        .collect();
    GraphDocument {
        name: DEFAULT_GRAPH_NAME.to_string(),
        subgraphs,
    }
}

/// Render one package in isolation.
pub fn render_package(package: &str, decls: &Declarations) -> Subgraph {
    let mut nodes = Vec::with_capacity(decls.len());
    for decl in decls.values() {
        report_unrepresented(package, decl);
        nodes.push(node_for(decl));
    }

    let mut edges = Vec::new();
    for decl in decls.values() {
        edges.extend(
            anchored_references(&decl.ty)
                .into_iter()
                .filter(|(_, target)| decls.contains_key(target))
                .map(|(anchor, target)| Edge {
                    source: decl.name.clone(),
                    anchor: Some(anchor),
                    target,
                }),
        );
    }

    Subgraph {
        package: package.to_string(),
        nodes,
        edges,
    }
}

/// The node drawn for a declaration.
pub fn node_for(decl: &Declaration) -> Node {
    let name = decl.name.clone();
    let simple = |shape| Node {
        name: decl.name.clone(),
        shape,
        label: Label::Text {
            text: format!("{} {}", decl.name, signature_of(&decl.ty)),
        },
    };

    match &decl.ty {
        TypeExpr::Name { .. } | TypeExpr::Qualified { .. } | TypeExpr::Pointer { .. } => {
            simple(NodeShape::Ellipse)
        }
        TypeExpr::Channel { .. } => simple(NodeShape::Box),
        TypeExpr::Function { .. } | TypeExpr::Array { .. } | TypeExpr::Map { .. } => {
            simple(NodeShape::Rectangle)
        }
        TypeExpr::Interface { methods } => Node {
            label: Label::Record {
                title: format!("{name} interface"),
                compartments: methods.iter().map(compartment).collect(),
            },
            name,
            shape: NodeShape::Mrecord,
        },
        TypeExpr::Struct { fields } => Node {
            label: Label::Record {
                title: name.clone(),
                compartments: fields.iter().map(compartment).collect(),
            },
            name,
            shape: NodeShape::Record,
        },
        TypeExpr::Unrepresented(_) => simple(NodeShape::Note),
    }
}

/// `a, b Type` for named members, `Type` for embedded ones.
fn compartment(field: &Field) -> String {
    if field.names.is_empty() {
        field_signature(field)
    } else {
        format!("{} {}", field.names.join(", "), field_signature(field))
    }
}

/// Every reference of a declaration body paired with the anchor it leaves
/// from, before filtering against the package.
///
/// Function and channel anchors count references; struct and interface
/// anchors count members, shared by all references inside a member.
/// Anchors are assigned before filtering so they stay stable when a target
/// is not declared.
pub fn anchored_references(ty: &TypeExpr) -> Vec<(usize, String)> {
    match ty {
        TypeExpr::Function { .. } | TypeExpr::Channel { .. } => {
            references_of(ty).into_iter().enumerate().collect()
        }
        TypeExpr::Struct { fields: members } | TypeExpr::Interface { methods: members } => {
            member_references(members)
                .into_iter()
                .enumerate()
                .flat_map(|(anchor, refs)| refs.into_iter().map(move |r| (anchor, r)))
                .collect()
        }
        TypeExpr::Name { .. }
        | TypeExpr::Qualified { .. }
        | TypeExpr::Pointer { .. }
        | TypeExpr::Map { .. }
        | TypeExpr::Array { .. }
        | TypeExpr::Unrepresented(_) => Vec::new(),
    }
}

fn report_unrepresented(package: &str, decl: &Declaration) {
    for raw in decl.ty.unrepresented_shapes() {
        warn!(
            package = %package,
            name = %decl.name,
            file = %decl.file_path.display(),
            line = decl.line,
            kind = %raw.kind,
            "unrepresented type shape, rendering placeholder"
        );
    }
}
