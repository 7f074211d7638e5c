//! Lowering of tree-sitter Go type syntax into [`TypeExpr`].
//!
//! Each grammar node kind maps onto one modeled shape. Kinds without a
//! counterpart (generic instantiations, constraint unions, `~T`) become
//! [`TypeExpr::Unrepresented`] carrying the node kind and source text.

use tree_sitter::Node;

use crate::graph::types::{Field, TypeExpr};

/// Lower a type node.
pub fn lower_type(node: Node<'_>, source: &str) -> TypeExpr {
    match node.kind() {
        "type_identifier" => TypeExpr::name(text(node, source)),
        "qualified_type" => {
            match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(owner), Some(member)) => TypeExpr::Qualified {
                    owner: Box::new(TypeExpr::name(text(owner, source))),
                    member: text(member, source),
                },
                _ => unrepresented(node, source),
            }
        }
        "pointer_type" => match first_named_child(node) {
            Some(inner) => TypeExpr::pointer(lower_type(inner, source)),
            None => unrepresented(node, source),
        },
        "parenthesized_type" => match first_named_child(node) {
            Some(inner) => lower_type(inner, source),
            None => unrepresented(node, source),
        },
        "slice_type" | "array_type" | "implicit_length_array_type" => {
            match node.child_by_field_name("element") {
                Some(element) => TypeExpr::array(lower_type(element, source)),
                None => unrepresented(node, source),
            }
        }
        "map_type" => match (
            node.child_by_field_name("key"),
            node.child_by_field_name("value"),
        ) {
            (Some(key), Some(value)) => {
                TypeExpr::map(lower_type(key, source), lower_type(value, source))
            }
            _ => unrepresented(node, source),
        },
        "channel_type" => match node.child_by_field_name("value") {
            Some(element) => TypeExpr::channel(lower_type(element, source)),
            None => unrepresented(node, source),
        },
        "function_type" => lower_signature(node, source),
        "struct_type" => lower_struct(node, source),
        "interface_type" => lower_interface(node, source),
        _ => unrepresented(node, source),
    }
}

/// Lower the `parameters`/`result` pair shared by function types and
/// interface methods.
pub fn lower_signature(node: Node<'_>, source: &str) -> TypeExpr {
    let params = node
        .child_by_field_name("parameters")
        .map(|list| lower_parameters(list, source))
        .unwrap_or_default();
    let results = match node.child_by_field_name("result") {
        Some(list) if list.kind() == "parameter_list" => lower_parameters(list, source),
        Some(single) => vec![Field::anonymous(lower_type(single, source))],
        None => Vec::new(),
    };
    TypeExpr::function(params, results)
}

fn lower_parameters(list: Node<'_>, source: &str) -> Vec<Field> {
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter_map(|param| match param.kind() {
            "parameter_declaration" => Some(lower_field(param, source)),
            "variadic_parameter_declaration" => Some(lower_field(param, source).variadic()),
            _ => None,
        })
        .collect()
}

fn lower_struct(node: Node<'_>, source: &str) -> TypeExpr {
    let mut fields = Vec::new();
    let mut cursor = node.walk();
    for list in node
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "field_declaration_list")
    {
        let mut list_cursor = list.walk();
        for decl in list
            .named_children(&mut list_cursor)
            .filter(|child| child.kind() == "field_declaration")
        {
            let mut field = lower_field(decl, source);
            if field.names.is_empty() && has_token(decl, "*") {
                field.ty = TypeExpr::pointer(field.ty);
            }
            fields.push(field);
        }
    }
    TypeExpr::structure(fields)
}

fn lower_interface(node: Node<'_>, source: &str) -> TypeExpr {
    let mut cursor = node.walk();
    let methods = node
        .named_children(&mut cursor)
        .filter_map(|elem| match elem.kind() {
            "method_elem" | "method_spec" => {
                let name = elem.child_by_field_name("name")?;
                Some(Field::named(text(name, source), lower_signature(elem, source)))
            }
            // A single embedded type; unions stay unrepresented.
            "type_elem" => {
                let mut elem_cursor = elem.walk();
                let types: Vec<Node<'_>> = elem
                    .named_children(&mut elem_cursor)
                    .filter(|child| child.kind() != "comment")
                    .collect();
                let ty = match types.as_slice() {
                    [single] => lower_type(*single, source),
                    _ => unrepresented(elem, source),
                };
                Some(Field::anonymous(ty))
            }
            _ => None,
        })
        .collect();
    TypeExpr::interface(methods)
}

/// Names plus type of a field or parameter declaration.
fn lower_field(node: Node<'_>, source: &str) -> Field {
    let mut cursor = node.walk();
    let names: Vec<String> = node
        .children_by_field_name("name", &mut cursor)
        .map(|name| text(name, source))
        .collect();
    let ty = match node.child_by_field_name("type") {
        Some(ty) => lower_type(ty, source),
        None => unrepresented(node, source),
    };
    Field::new(names, ty)
}

fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let child = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    child
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

pub(crate) fn unrepresented(node: Node<'_>, source: &str) -> TypeExpr {
    TypeExpr::unrepresented(node.kind(), text(node, source))
}

pub(crate) fn text(node: Node<'_>, source: &str) -> String {
    source
        .get(node.byte_range())
        .unwrap_or_default()
        .to_string()
}
