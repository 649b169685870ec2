//! Naming utilities for code generation

/// Upper-case the first character, leaving the rest untouched.
///
/// `"orders"` -> `"Orders"`, `"userId"` -> `"UserId"`, `""` -> `""`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a table id to a struct name
pub fn to_struct_name(table_id: &str) -> String {
    escape_identifier(capitalize(table_id))
}

/// Convert a column name to a field name
pub fn to_field_name(column_name: &str) -> String {
    escape_identifier(capitalize(column_name))
}

/// Check whether `name` can be used verbatim as a Rust identifier
pub fn is_valid_identifier(name: &str) -> bool {
    syn::parse_str::<syn::Ident>(name).is_ok()
}

/// Check if a name is a Rust reserved keyword
pub fn is_rust_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "async"
            | "await"
            | "break"
            | "const"
            | "continue"
            | "crate"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "try"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
    )
}

/// Suffix keywords with `_`.
///
/// Raw identifiers can't be used here: `r#Self` is rejected by the compiler,
/// and `Self` is the one keyword a capitalized name can turn into.
fn escape_identifier(name: String) -> String {
    if is_rust_keyword(&name) {
        format!("{}_", name)
    } else {
        name
    }
}
