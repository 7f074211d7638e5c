//! Graph builder: scans a directory and builds the package table.
//!
//! Lists the Go files directly inside a directory, parses each with
//! tree-sitter, and collects their type declarations.

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::collector::collect_declarations;
use super::dot::write_graph;
use super::types::PackageTable;
use crate::error::{GoerdError, Result};
use crate::parser::{is_go_source, parse_source, ParsedFile};

/// Collect the declarations of every Go file in `root`.
///
/// Sub-directories are not entered. Files are parsed in parallel but
/// collected in path order, so a type declared twice resolves the same way
/// on every run. Any file that fails to parse aborts the whole run.
pub fn inspect_dir(root: &Path) -> Result<PackageTable> {
    let files = source_files(root)?;
    debug!(root = %root.display(), files = files.len(), "inspecting directory");

    let parsed: Vec<ParsedFile> = files
        .par_iter()
        .map(|path| parse_file(path))
        .collect::<Result<_>>()?;

    Ok(collect_declarations(&parsed))
}

/// Read and parse one file.
pub fn parse_file(path: &Path) -> Result<ParsedFile> {
    debug!(file = %path.display(), "parsing file");
    let source = fs::read_to_string(path).map_err(|e| GoerdError::io(path, e))?;
    parse_source(path, &source)
}

/// Go files directly inside `root`, sorted by path.
pub fn source_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        let source = match fs::metadata(root) {
            Ok(_) => std::io::Error::other("not a directory"),
            Err(e) => e,
        };
        return Err(GoerdError::io(root, source));
    }

    let mut files = Vec::new();
    for entry in WalkBuilder::new(root)
        .max_depth(Some(1))
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build()
    {
        let entry = entry?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) && is_go_source(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Inspect `root` and write its DOT graph to `out`.
pub fn render_dir<W: Write + ?Sized>(root: &Path, graph_name: &str, out: &mut W) -> Result<()> {
    let table = inspect_dir(root)?;
    write_graph(out, &table, graph_name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_source_files_are_sorted_and_shallow() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.go"), "package p\n").unwrap();
        fs::write(dir.path().join("a.go"), "package p\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not go").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.go"), "package sub\n").unwrap();

        let files = source_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = inspect_dir(&dir.path().join("nope"));
        assert!(matches!(result, Err(GoerdError::Io { .. })));
    }

    #[test]
    fn test_later_file_wins_on_redeclaration() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "package p\n\ntype Dup int\n").unwrap();
        fs::write(dir.path().join("b.go"), "package p\n\ntype Dup chan int\n").unwrap();

        let table = inspect_dir(dir.path()).unwrap();
        let dup = table.get("p", "Dup").unwrap();
        assert!(dup.file_path.ends_with("b.go"));
        assert_eq!(dup.ty.kind(), crate::graph::types::ShapeKind::Channel);
    }

    #[test]
    fn test_parse_failure_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.go"), "package p\n\ntype A int\n").unwrap();
        fs::write(dir.path().join("bad.go"), "package p\n\ntype B struct {\n").unwrap();

        let result = inspect_dir(dir.path());
        assert!(result.is_err_and(|e| e.is_parse_failure()));
    }
}
