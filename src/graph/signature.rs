//! Human-readable signatures for type expressions.
//!
//! Signatures are plain text; escaping for DOT labels happens at emission
//! time through [`escape_label`].

use super::types::{Field, TypeExpr};

/// Characters that get a backslash prefix inside graph labels.
pub const LABEL_ESCAPES: &[char] = &[' ', '\'', '`', '[', ']', '{', '}', '(', ')', '*'];

/// Render a type expression as a Go-like signature.
///
/// Nested structs and interfaces collapse to `struct{}` / `interface{}`;
/// the full member layout is only drawn for top-level declarations.
pub fn signature_of(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Name { name } => name.clone(),
        TypeExpr::Qualified { owner, member } => format!("{}.{}", signature_of(owner), member),
        TypeExpr::Pointer { inner } => format!("*{}", signature_of(inner)),
        TypeExpr::Map { key, value } => {
            format!("map[{}]{}", signature_of(key), signature_of(value))
        }
        TypeExpr::Channel { element } => format!("chan {}", signature_of(element)),
        TypeExpr::Array { element } => format!("[]{}", signature_of(element)),
        TypeExpr::Interface { .. } => "interface{}".to_string(),
        TypeExpr::Struct { .. } => "struct{}".to_string(),
        TypeExpr::Function { params, results } => {
            let mut out = format!("func({})", join_fields(params));
            if !results.is_empty() {
                out.push_str(&format!(" ({})", join_fields(results)));
            }
            out
        }
        TypeExpr::Unrepresented(raw) => raw.to_string(),
    }
}

/// Signature of a single field's type, ignoring its names.
pub fn field_signature(field: &Field) -> String {
    if field.variadic {
        format!("...{}", signature_of(&field.ty))
    } else {
        signature_of(&field.ty)
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(field_signature)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prefix every character of [`LABEL_ESCAPES`] with a backslash.
pub fn escape_label(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    for c in input.chars() {
        if LABEL_ESCAPES.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_shapes() {
        assert_eq!(signature_of(&TypeExpr::name("int")), "int");
        assert_eq!(signature_of(&TypeExpr::qualified("http", "Request")), "http.Request");
        assert_eq!(signature_of(&TypeExpr::pointer(TypeExpr::name("User"))), "*User");
        assert_eq!(
            signature_of(&TypeExpr::map(TypeExpr::name("string"), TypeExpr::name("User"))),
            "map[string]User"
        );
        assert_eq!(signature_of(&TypeExpr::channel(TypeExpr::name("Event"))), "chan Event");
        assert_eq!(signature_of(&TypeExpr::array(TypeExpr::name("byte"))), "[]byte");
    }

    #[test]
    fn test_nested_aggregates_collapse() {
        let ty = TypeExpr::map(
            TypeExpr::name("string"),
            TypeExpr::structure(vec![Field::named("x", TypeExpr::name("int"))]),
        );
        assert_eq!(signature_of(&ty), "map[string]struct{}");
        assert_eq!(
            signature_of(&TypeExpr::array(TypeExpr::interface(vec![]))),
            "[]interface{}"
        );
    }

    #[test]
    fn test_function_signatures() {
        let no_results = TypeExpr::function(
            vec![
                Field::named("a", TypeExpr::name("A")),
                Field::anonymous(TypeExpr::pointer(TypeExpr::name("B"))),
            ],
            vec![],
        );
        assert_eq!(signature_of(&no_results), "func(A, *B)");

        let with_results = TypeExpr::function(
            vec![Field::named("args", TypeExpr::name("string")).variadic()],
            vec![
                Field::anonymous(TypeExpr::name("int")),
                Field::anonymous(TypeExpr::name("error")),
            ],
        );
        assert_eq!(signature_of(&with_results), "func(...string) (int, error)");

        assert_eq!(signature_of(&TypeExpr::function(vec![], vec![])), "func()");
    }

    #[test]
    fn test_unknown_shape_sentinel() {
        let ty = TypeExpr::pointer(TypeExpr::unrepresented("generic_type", "List[T]"));
        assert_eq!(signature_of(&ty), "*?generic_type:List[T]");
    }

    #[test]
    fn test_escape_label_prefixes_each_special_char_once() {
        assert_eq!(escape_label("map[string]*User"), "map\\[string\\]\\*User");
        assert_eq!(escape_label("func(A) (B)"), "func\\(A\\)\\ \\(B\\)");
        assert_eq!(escape_label("interface{}"), "interface\\{\\}");
        assert_eq!(escape_label("'q' `r`"), "\\'q\\'\\ \\`r\\`");
        assert_eq!(escape_label("plain.Name_1,x"), "plain.Name_1,x");
    }

    #[test]
    fn test_escape_label_alters_nothing_else() {
        let input = "a [b] {c} (d) *e 'f' `g` h.i";
        let escaped = escape_label(input);
        let unescaped: String = {
            let mut out = String::new();
            let mut chars = escaped.chars().peekable();
            while let Some(c) = chars.next() {
                if c == '\\' && chars.peek().is_some_and(|n| LABEL_ESCAPES.contains(n)) {
                    continue;
                }
                out.push(c);
            }
            out
        };
        assert_eq!(unescaped, input);
        let specials = input.chars().filter(|c| LABEL_ESCAPES.contains(c)).count();
        assert_eq!(escaped.len(), input.len() + specials);
    }
}
