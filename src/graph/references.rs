//! Named-type references inside a type expression.

use super::signature::signature_of;
use super::types::{Field, TypeExpr};

/// Collect every named type `ty` mentions, in order of appearance.
///
/// Only the expression itself is walked: a `Name` is yielded as-is and its
/// own declaration is never consulted, so edges stay one level deep.
/// Qualified names are yielded whole (`pkg.Type`).
pub fn references_of(ty: &TypeExpr) -> Vec<String> {
    let mut refs = Vec::new();
    collect(ty, &mut refs);
    refs
}

/// References of every member of a field list, grouped per member.
///
/// Struct and interface edges anchor on the member index, so the grouping
/// is kept.
pub fn member_references(fields: &[Field]) -> Vec<Vec<String>> {
    fields.iter().map(|field| references_of(&field.ty)).collect()
}

fn collect(ty: &TypeExpr, refs: &mut Vec<String>) {
    match ty {
        TypeExpr::Name { name } => refs.push(name.clone()),
        TypeExpr::Qualified { owner, member } => {
            refs.push(format!("{}.{}", signature_of(owner), member))
        }
        TypeExpr::Pointer { inner } => collect(inner, refs),
        TypeExpr::Map { key, value } => {
            collect(key, refs);
            collect(value, refs);
        }
        TypeExpr::Channel { element } | TypeExpr::Array { element } => collect(element, refs),
        TypeExpr::Struct { fields } => {
            for field in fields {
                collect(&field.ty, refs);
            }
        }
        TypeExpr::Interface { methods } => {
            for method in methods {
                collect(&method.ty, refs);
            }
        }
        TypeExpr::Function { params, results } => {
            for field in params.iter().chain(results) {
                collect(&field.ty, refs);
            }
        }
        TypeExpr::Unrepresented(raw) => refs.push(raw.to_string()),
    }
}
