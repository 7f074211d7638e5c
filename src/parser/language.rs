//! Go source detection and tree-sitter grammar loading.

use std::path::Path;
use tree_sitter::{Language, Parser};

use crate::error::Result;

/// File extension of Go sources.
pub const GO_EXTENSION: &str = "go";

/// Whether `path` names a Go source file.
pub fn is_go_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == GO_EXTENSION)
}

/// The tree-sitter Go grammar.
pub fn go_language() -> Language {
    tree_sitter_go::LANGUAGE.into()
}

/// A parser configured for Go.
pub fn go_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser.set_language(&go_language())?;
    Ok(parser)
}
