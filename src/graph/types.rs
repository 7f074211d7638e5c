//! Core types for the goerd type graph.
//!
//! Defines the structural type-expression model, declarations, and the
//! per-package table the renderer consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// The structural shape of a declared type.
///
/// Nine shapes are modeled. Anything the lowering step cannot express with
/// them (generic instantiations, constraint unions, ...) is carried as
/// [`TypeExpr::Unrepresented`] so renderers can surface the gap instead of
/// producing plausible-looking output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypeExpr {
    /// A bare identifier: `User`, `int`.
    Name { name: String },
    /// A name scoped through another name: `http.Request`.
    Qualified { owner: Box<TypeExpr>, member: String },
    /// `*T`
    Pointer { inner: Box<TypeExpr> },
    /// `map[K]V`
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// `chan T`, `<-chan T`, `chan<- T`
    Channel { element: Box<TypeExpr> },
    /// `[]T`, `[N]T`, `[...]T`
    Array { element: Box<TypeExpr> },
    /// `func(params) results`
    Function { params: Vec<Field>, results: Vec<Field> },
    /// `struct { ... }`
    Struct { fields: Vec<Field> },
    /// `interface { ... }`
    Interface { methods: Vec<Field> },
    /// A shape outside the modeled set.
    Unrepresented(RawShape),
}

/// One entry of a field list: struct field, parameter, result, or
/// interface member.
///
/// Interface methods carry their method name in `names` and a
/// [`TypeExpr::Function`] as `ty`; embedded interfaces and embedded struct
/// fields have no names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// `...T` parameter.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub variadic: bool,
}

impl Field {
    pub fn new(names: Vec<String>, ty: TypeExpr) -> Self {
        Self {
            names,
            ty,
            variadic: false,
        }
    }

    /// A field without names (anonymous parameter, embedded field).
    pub fn anonymous(ty: TypeExpr) -> Self {
        Self::new(Vec::new(), ty)
    }

    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self::new(vec![name.into()], ty)
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// Raw syntax the lowering step could not map onto a modeled shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShape {
    /// Grammar node kind, e.g. `generic_type`.
    pub kind: String,
    /// Source text of the node.
    pub text: String,
}

impl RawShape {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }
}

/// Renders as `?<kind>:<text>` with whitespace collapsed. Characters that
/// would break the surrounding DOT string or record syntax are replaced.
impl fmt::Display for RawShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self
            .text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .map(|c| match c {
                '"' | '\\' | '|' | '<' | '>' => '_',
                c => c,
            })
            .collect();
        write!(f, "?{}:{}", self.kind, text)
    }
}

impl TypeExpr {
    pub fn name(name: impl Into<String>) -> Self {
        TypeExpr::Name { name: name.into() }
    }

    pub fn qualified(owner: impl Into<String>, member: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            owner: Box::new(TypeExpr::name(owner)),
            member: member.into(),
        }
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer {
            inner: Box::new(inner),
        }
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn channel(element: TypeExpr) -> Self {
        TypeExpr::Channel {
            element: Box::new(element),
        }
    }

    pub fn array(element: TypeExpr) -> Self {
        TypeExpr::Array {
            element: Box::new(element),
        }
    }

    pub fn function(params: Vec<Field>, results: Vec<Field>) -> Self {
        TypeExpr::Function { params, results }
    }

    pub fn structure(fields: Vec<Field>) -> Self {
        TypeExpr::Struct { fields }
    }

    pub fn interface(methods: Vec<Field>) -> Self {
        TypeExpr::Interface { methods }
    }

    pub fn unrepresented(kind: impl Into<String>, text: impl Into<String>) -> Self {
        TypeExpr::Unrepresented(RawShape::new(kind, text))
    }

    /// The shape discriminant, without payload.
    pub fn kind(&self) -> ShapeKind {
        match self {
            TypeExpr::Name { .. } => ShapeKind::Name,
            TypeExpr::Qualified { .. } => ShapeKind::Qualified,
            TypeExpr::Pointer { .. } => ShapeKind::Pointer,
            TypeExpr::Map { .. } => ShapeKind::Map,
            TypeExpr::Channel { .. } => ShapeKind::Channel,
            TypeExpr::Array { .. } => ShapeKind::Array,
            TypeExpr::Function { .. } => ShapeKind::Function,
            TypeExpr::Struct { .. } => ShapeKind::Struct,
            TypeExpr::Interface { .. } => ShapeKind::Interface,
            TypeExpr::Unrepresented(_) => ShapeKind::Unrepresented,
        }
    }

    /// Every unrepresented node in this tree, in left-to-right order.
    pub fn unrepresented_shapes(&self) -> Vec<&RawShape> {
        let mut out = Vec::new();
        self.collect_unrepresented(&mut out);
        out
    }

    fn collect_unrepresented<'a>(&'a self, out: &mut Vec<&'a RawShape>) {
        match self {
            TypeExpr::Name { .. } => {}
            TypeExpr::Qualified { owner, .. } => owner.collect_unrepresented(out),
            TypeExpr::Pointer { inner } => inner.collect_unrepresented(out),
            TypeExpr::Map { key, value } => {
                key.collect_unrepresented(out);
                value.collect_unrepresented(out);
            }
            TypeExpr::Channel { element } | TypeExpr::Array { element } => {
                element.collect_unrepresented(out)
            }
            TypeExpr::Function { params, results } => {
                for field in params.iter().chain(results) {
                    field.ty.collect_unrepresented(out);
                }
            }
            TypeExpr::Struct { fields: members } | TypeExpr::Interface { methods: members } => {
                for field in members {
                    field.ty.collect_unrepresented(out);
                }
            }
            TypeExpr::Unrepresented(raw) => out.push(raw),
        }
    }
}

/// Discriminant of [`TypeExpr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Name,
    Qualified,
    Pointer,
    Map,
    Channel,
    Array,
    Function,
    Struct,
    Interface,
    Unrepresented,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Name => write!(f, "name"),
            ShapeKind::Qualified => write!(f, "qualified"),
            ShapeKind::Pointer => write!(f, "pointer"),
            ShapeKind::Map => write!(f, "map"),
            ShapeKind::Channel => write!(f, "channel"),
            ShapeKind::Array => write!(f, "array"),
            ShapeKind::Function => write!(f, "function"),
            ShapeKind::Struct => write!(f, "struct"),
            ShapeKind::Interface => write!(f, "interface"),
            ShapeKind::Unrepresented => write!(f, "unrepresented"),
        }
    }
}

/// A named type declared at package scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// The declared identifier.
    pub name: String,
    /// The declaration's body.
    pub ty: TypeExpr,
    /// File the declaration was collected from.
    pub file_path: PathBuf,
    /// Line of the declaration (1-indexed).
    pub line: usize,
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            file_path: PathBuf::new(),
            line: 0,
        }
    }

    pub fn at(mut self, file_path: PathBuf, line: usize) -> Self {
        self.file_path = file_path;
        self.line = line;
        self
    }
}

/// Declarations of one package, keyed by declared name.
pub type Declarations = BTreeMap<String, Declaration>;

/// All collected declarations, grouped by package name.
///
/// Built once per run and read-only afterwards. Ordered maps keep emission
/// stable between runs; nothing depends on that order for correctness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageTable {
    packages: BTreeMap<String, Declarations>,
}

impl PackageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `package` has a bucket, even if it declares no types.
    pub fn ensure_package(&mut self, package: &str) {
        if !self.packages.contains_key(package) {
            self.packages.insert(package.to_string(), Declarations::new());
        }
    }

    /// Record a declaration. A previous declaration with the same name in
    /// the same package is replaced and returned.
    pub fn insert(&mut self, package: &str, declaration: Declaration) -> Option<Declaration> {
        self.ensure_package(package);
        self.packages
            .get_mut(package)
            .and_then(|decls| decls.insert(declaration.name.clone(), declaration))
    }

    pub fn package(&self, package: &str) -> Option<&Declarations> {
        self.packages.get(package)
    }

    pub fn get(&self, package: &str, name: &str) -> Option<&Declaration> {
        self.packages.get(package)?.get(name)
    }

    pub fn contains(&self, package: &str, name: &str) -> bool {
        self.get(package, name).is_some()
    }

    pub fn packages(&self) -> impl Iterator<Item = (&str, &Declarations)> {
        self.packages.iter().map(|(name, decls)| (name.as_str(), decls))
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn declaration_count(&self) -> usize {
        self.packages.values().map(|decls| decls.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
