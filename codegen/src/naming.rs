//! Identifier and path helpers.

use heck::{ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Ident, Span};
use schema::CaseValue;

use crate::error::{CodegenError, CodegenResult};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Names that cannot be raw identifiers, plus the parameters of generated
/// bodies.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_", "reader", "writer"];

fn ident(name: String) -> Ident {
    let name = if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    };
    if RESERVED.contains(&name.as_str()) {
        Ident::new(&format!("{name}_"), Span::call_site())
    } else if KEYWORDS.contains(&name.as_str()) {
        Ident::new_raw(&name, Span::call_site())
    } else {
        Ident::new(&name, Span::call_site())
    }
}

/// A type name as a Rust type identifier.
pub fn type_ident(name: &str) -> Ident {
    ident(name.to_upper_camel_case())
}

/// A member or local name as a Rust identifier, raw if it is a keyword.
pub fn member_ident(name: &str) -> Ident {
    ident(name.to_snake_case())
}

/// An enum value or case name as a variant identifier.
///
/// Numeric names become `Value{n}`.
pub fn variant_ident(name: &str) -> Ident {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        ident(format!("Value{name}"))
    } else {
        ident(name.to_upper_camel_case())
    }
}

/// The suffix naming a switch case's data type and variant.
pub fn case_suffix(value: &CaseValue) -> Ident {
    match value {
        CaseValue::Value(value) => variant_ident(value),
        CaseValue::Default => ident("Default".to_string()),
    }
}

/// Parses a `::`-separated module path.
pub fn parse_path(path: &str) -> CodegenResult<syn::Path> {
    syn::parse_str(path).map_err(|_| CodegenError::InvalidModulePath {
        path: path.to_string(),
    })
}
