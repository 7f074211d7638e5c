//! Go source parsing.
//!
//! Parses a file with tree-sitter and keeps only its top level: the package
//! clause and one [`SourceItem`] per top-level declaration or comment. Type
//! declarations are lowered into the [`TypeExpr`] model; function bodies are
//! never entered, so types declared inside them are not seen.

pub mod language;
pub mod lower;

use std::path::{Path, PathBuf};
use tree_sitter::Node;

use crate::error::{GoerdError, Result};
use crate::graph::types::TypeExpr;

pub use language::{go_language, go_parser, is_go_source};
use lower::{lower_type, text};

/// One `type` spec: `Name Body` or `Name = Body`. Aliases are collected
/// like definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub ty: TypeExpr,
    /// 1-indexed line of the name.
    pub line: usize,
}

/// A top-level element of a Go file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceItem {
    /// A `type` declaration, possibly grouped: `type ( ... )`.
    Types(Vec<TypeSpec>),
    Function { name: String },
    Method { name: String },
    /// `const` or `var` declaration.
    Value,
    Import,
    Comment(String),
}

/// The top level of one parsed Go file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub package: String,
    pub items: Vec<SourceItem>,
}

impl ParsedFile {
    /// All type specs of the file, in source order.
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec> {
        self.items
            .iter()
            .filter_map(|item| match item {
                SourceItem::Types(specs) => Some(specs),
                _ => None,
            })
            .flatten()
    }
}

/// Parse one Go source file.
///
/// Any syntax error in the file is fatal: no partial result is returned.
pub fn parse_source(path: &Path, source: &str) -> Result<ParsedFile> {
    let mut parser = go_parser()?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| GoerdError::Parse {
            path: path.to_path_buf(),
        })?;
    let root = tree.root_node();

    if root.has_error() {
        let (line, column) = first_error(root)
            .map(|node| {
                let pos = node.start_position();
                (pos.row + 1, pos.column + 1)
            })
            .unwrap_or((1, 1));
        return Err(GoerdError::Syntax {
            path: path.to_path_buf(),
            line,
            column,
        });
    }

    let mut package = None;
    let mut items = Vec::new();
    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "package_clause" => package = package_name(node, source),
            "type_declaration" => items.push(SourceItem::Types(type_specs(node, source))),
            "function_declaration" => items.push(SourceItem::Function {
                name: field_text(node, "name", source),
            }),
            "method_declaration" => items.push(SourceItem::Method {
                name: field_text(node, "name", source),
            }),
            "import_declaration" => items.push(SourceItem::Import),
            "const_declaration" | "var_declaration" => items.push(SourceItem::Value),
            "comment" => items.push(SourceItem::Comment(text(node, source))),
            _ => {}
        }
    }

    let package = package.ok_or_else(|| GoerdError::MissingPackage {
        path: path.to_path_buf(),
    })?;

    Ok(ParsedFile {
        path: path.to_path_buf(),
        package,
        items,
    })
}

fn package_name(node: Node<'_>, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    let name = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == "package_identifier")
        .map(|child| text(child, source));
    name
}

fn type_specs(node: Node<'_>, source: &str) -> Vec<TypeSpec> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|spec| matches!(spec.kind(), "type_spec" | "type_alias"))
        .filter_map(|spec| {
            let name = spec.child_by_field_name("name")?;
            let body = spec.child_by_field_name("type")?;
            // Generic declarations are outside the model.
            let ty = match spec.child_by_field_name("type_parameters") {
                Some(params) => TypeExpr::unrepresented(params.kind(), text(spec, source)),
                None => lower_type(body, source),
            };
            Some(TypeSpec {
                name: text(name, source),
                ty,
                line: name.start_position().row + 1,
            })
        })
        .collect()
}

fn field_text(node: Node<'_>, field: &str, source: &str) -> String {
    node.child_by_field_name(field)
        .map(|child| text(child, source))
        .unwrap_or_default()
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}
