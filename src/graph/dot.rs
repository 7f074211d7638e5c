//! DOT text emission for a [`GraphDocument`].
//!
//! Layout of the output:
//!
//! ```text
//! digraph "GoERD" {
//! subgraph "main" {
//! label="main";
//!  "node-A" [shape=record,label="{A|<f0>B\ B}"];
//!  "node-B" [shape=record,label="{B|<f0>X\ int}"];
//! "node-A":f0 -> "node-B";
//! }
//! }
//! ```

use std::io::{self, Write};

use super::render::{node_id, render_graph, Edge, GraphDocument, Label, Node, Subgraph};
use super::signature::escape_label;
use super::types::PackageTable;

/// Render `table` and write it as DOT under `graph_name`.
pub fn write_graph<W: Write + ?Sized>(
    out: &mut W,
    table: &PackageTable,
    graph_name: &str,
) -> io::Result<()> {
    render_graph(table).with_name(graph_name).write_dot(out)
}

/// Write the whole document as DOT.
pub fn write_dot<W: Write + ?Sized>(doc: &GraphDocument, out: &mut W) -> io::Result<()> {
    writeln!(out, "digraph {} {{", quote(&doc.name))?;
    for subgraph in &doc.subgraphs {
        write_subgraph(subgraph, out)?;
    }
    writeln!(out, "}}")
}

fn write_subgraph<W: Write + ?Sized>(subgraph: &Subgraph, out: &mut W) -> io::Result<()> {
    writeln!(out, "subgraph {} {{", quote(&subgraph.package))?;
    writeln!(out, "label={};", quote(&subgraph.package))?;
    for node in &subgraph.nodes {
        writeln!(out, "{}", node_statement(node))?;
    }
    for edge in &subgraph.edges {
        writeln!(out, "{}", edge_statement(edge))?;
    }
    writeln!(out, "}}")
}

/// ` "node-A" [shape=record,label="..."];`
pub fn node_statement(node: &Node) -> String {
    format!(
        " \"{}\" [shape={},label=\"{}\"];",
        node.id(),
        node.shape,
        label_text(&node.label)
    )
}

/// `"node-A":f0 -> "node-B";`
pub fn edge_statement(edge: &Edge) -> String {
    let source = match edge.anchor {
        Some(anchor) => format!("\"{}\":f{}", node_id(&edge.source), anchor),
        None => format!("\"{}\"", node_id(&edge.source)),
    };
    format!("{} -> \"{}\";", source, node_id(&edge.target))
}

/// Escaped label as it appears between the quotes of `label="..."`.
pub fn label_text(label: &Label) -> String {
    match label {
        Label::Text { text } => escape_label(text),
        Label::Record {
            title,
            compartments,
        } => {
            let fields: Vec<String> = compartments
                .iter()
                .enumerate()
                .map(|(i, text)| format!("<f{}>{}", i, escape_label(text)))
                .collect();
            format!("{{{}|{}}}", escape_label(title), fields.join("|"))
        }
    }
}

/// A double-quoted DOT string.
fn quote(input: &str) -> String {
    format!("\"{}\"", input.replace('\\', "\\\\").replace('"', "\\\""))
}

impl GraphDocument {
    /// Write this document as DOT.
    pub fn write_dot<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write_dot(self, out)
    }

    /// The document as a DOT string.
    pub fn to_dot(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = write_dot(self, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::render::NodeShape;
    use crate::graph::types::{Declaration, Field, TypeExpr};

    #[test]
    fn test_struct_document() {
        let mut table = PackageTable::new();
        table.insert(
            "main",
            Declaration::new(
                "A",
                TypeExpr::structure(vec![Field::named("B", TypeExpr::name("B"))]),
            ),
        );
        table.insert(
            "main",
            Declaration::new(
                "B",
                TypeExpr::structure(vec![Field::named("X", TypeExpr::name("int"))]),
            ),
        );

        let dot = render_graph(&table).to_dot();
        let expected = "digraph \"GoERD\" {\n\
                        subgraph \"main\" {\n\
                        label=\"main\";\n \
                        \"node-A\" [shape=record,label=\"{A|<f0>B\\ B}\"];\n \
                        \"node-B\" [shape=record,label=\"{B|<f0>X\\ int}\"];\n\
                        \"node-A\":f0 -> \"node-B\";\n\
                        }\n\
                        }\n";
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_simple_node_statement() {
        let node = Node {
            name: "Handler".to_string(),
            shape: NodeShape::Rectangle,
            label: Label::Text {
                text: "Handler func(*Request) (error)".to_string(),
            },
        };
        assert_eq!(
            node_statement(&node),
            " \"node-Handler\" [shape=rectangle,label=\"Handler\\ func\\(\\*Request\\)\\ \\(error\\)\"];"
        );
    }

    #[test]
    fn test_record_label_escapes_compartments() {
        let label = Label::Record {
            title: "Store interface".to_string(),
            compartments: vec![
                "Get func(string) (*Item)".to_string(),
                "io.Closer".to_string(),
            ],
        };
        assert_eq!(
            label_text(&label),
            "{Store\\ interface|<f0>Get\\ func\\(string\\)\\ \\(\\*Item\\)|<f1>io.Closer}"
        );

        let empty = Label::Record {
            title: "Empty".to_string(),
            compartments: vec![],
        };
        assert_eq!(label_text(&empty), "{Empty|}");
    }

    #[test]
    fn test_edge_statements() {
        let anchored = Edge {
            source: "F".to_string(),
            anchor: Some(1),
            target: "B".to_string(),
        };
        assert_eq!(edge_statement(&anchored), "\"node-F\":f1 -> \"node-B\";");

        let plain = Edge {
            source: "F".to_string(),
            anchor: None,
            target: "B".to_string(),
        };
        assert_eq!(edge_statement(&plain), "\"node-F\" -> \"node-B\";");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_graph(&PackageTable::new()).to_dot(), "digraph \"GoERD\" {\n}\n");
    }

    #[test]
    fn test_document_name_is_quoted() {
        let doc = render_graph(&PackageTable::new()).with_name("my \"graph\"");
        assert!(doc.to_dot().starts_with("digraph \"my \\\"graph\\\"\" {"));
    }

    #[test]
    fn test_write_graph_from_table() {
        let mut table = PackageTable::new();
        table.insert("main", Declaration::new("C", TypeExpr::channel(TypeExpr::name("D"))));
        table.insert("main", Declaration::new("D", TypeExpr::structure(vec![])));

        let mut buf = Vec::new();
        write_graph(&mut buf, &table, "Types").unwrap();
        let dot = String::from_utf8(buf).unwrap();
        assert_eq!(dot, render_graph(&table).with_name("Types").to_dot());
        assert!(dot.starts_with("digraph \"Types\" {\n"));
        assert!(dot.contains("\"node-C\":f0 -> \"node-D\";"));
    }
}
