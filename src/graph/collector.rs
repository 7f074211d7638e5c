//! Declaration collector: parsed files to a [`PackageTable`].

use tracing::debug;

use super::types::{Declaration, PackageTable};
use crate::parser::{ParsedFile, SourceItem};

/// Build the package table from parsed files.
///
/// Only top-level type declarations are recorded; functions, values,
/// imports and comments are skipped. Files are visited in the given order
/// and a name declared twice in one package keeps the last declaration.
pub fn collect_declarations<'a, I>(files: I) -> PackageTable
where
    I: IntoIterator<Item = &'a ParsedFile>,
{
    let mut table = PackageTable::new();
    for file in files {
        collect_file(&mut table, file);
    }
    table
}

/// Add one file's declarations to `table`.
pub fn collect_file(table: &mut PackageTable, file: &ParsedFile) {
    debug!(file = %file.path.display(), package = %file.package, "collecting file");
    table.ensure_package(&file.package);

    for item in &file.items {
        let specs = match item {
            SourceItem::Types(specs) => specs,
            SourceItem::Function { .. }
            | SourceItem::Method { .. }
            | SourceItem::Value
            | SourceItem::Import
            | SourceItem::Comment(_) => continue,
        };
        for spec in specs {
            let declaration = Declaration::new(spec.name.clone(), spec.ty.clone())
                .at(file.path.clone(), spec.line);
            if let Some(previous) = table.insert(&file.package, declaration) {
                debug!(
                    package = %file.package,
                    name = %spec.name,
                    previous = %previous.file_path.display(),
                    "type redeclared, keeping the later declaration"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::TypeExpr;
    use crate::parser::TypeSpec;
    use std::path::PathBuf;

    fn spec(name: &str, ty: TypeExpr) -> TypeSpec {
        TypeSpec {
            name: name.to_string(),
            ty,
            line: 1,
        }
    }

    fn file(path: &str, package: &str, items: Vec<SourceItem>) -> ParsedFile {
        ParsedFile {
            path: PathBuf::from(path),
            package: package.to_string(),
            items,
        }
    }

    #[test]
    fn test_only_type_declarations_are_collected() {
        let parsed = file(
            "a.go",
            "main",
            vec![
                SourceItem::Comment("// doc".to_string()),
                SourceItem::Import,
                SourceItem::Types(vec![
                    spec("A", TypeExpr::name("int")),
                    spec("B", TypeExpr::name("string")),
                ]),
                SourceItem::Function {
                    name: "main".to_string(),
                },
                SourceItem::Value,
            ],
        );
        let table = collect_declarations([&parsed]);

        let names: Vec<&String> = table.package("main").unwrap().keys().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(
            table.get("main", "A").unwrap().file_path,
            PathBuf::from("a.go")
        );
    }

    #[test]
    fn test_files_group_by_package() {
        let int_type = |name: &str| SourceItem::Types(vec![spec(name, TypeExpr::name("int"))]);
        let files = vec![
            file("a.go", "app", vec![int_type("A")]),
            file("a_test.go", "app_test", vec![int_type("T")]),
            file("b.go", "app", vec![int_type("B")]),
            file("doc.go", "app", vec![SourceItem::Comment("// Package app".to_string())]),
        ];
        let table = collect_declarations(&files);

        assert_eq!(table.package_count(), 2);
        assert!(table.contains("app", "A"));
        assert!(table.contains("app", "B"));
        assert!(table.contains("app_test", "T"));
        assert!(!table.contains("app", "T"));
    }

    #[test]
    fn test_last_declaration_wins() {
        let files = vec![
            file("one.go", "p", vec![SourceItem::Types(vec![spec("Dup", TypeExpr::name("int"))])]),
            file(
                "two.go",
                "p",
                vec![SourceItem::Types(vec![spec(
                    "Dup",
                    TypeExpr::channel(TypeExpr::name("int")),
                )])],
            ),
        ];
        let table = collect_declarations(&files);

        let dup = table.get("p", "Dup").unwrap();
        assert_eq!(dup.ty, TypeExpr::channel(TypeExpr::name("int")));
        assert_eq!(dup.file_path, PathBuf::from("two.go"));
        assert_eq!(table.declaration_count(), 1);
    }

    #[test]
    fn test_package_without_types_still_present() {
        let parsed = file("doc.go", "empty", vec![SourceItem::Import]);
        let table = collect_declarations([&parsed]);
        assert!(table.package("empty").is_some_and(|d| d.is_empty()));
    }
}
