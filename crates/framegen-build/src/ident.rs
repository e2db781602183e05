//! Mapping from protocol names to Rust identifiers.

use crate::error::GenerateError;
use convert_case::{Case, Casing};
use proc_macro2::{Ident, Span};

// keywords that cannot be raw identifiers
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Field identifier, e.g. `no-wait` -> `no_wait`, `type` -> `r#type`.
pub(crate) fn field_ident(name: &str) -> Result<Ident, GenerateError> {
    rust_ident(&field_name(name), name)
}

/// Field name as it appears in the generated record, without any raw prefix.
///
/// Only separators are rewritten, so `b0` stays `b0` and distinct protocol
/// names stay distinct.
pub(crate) fn field_name(name: &str) -> String {
    snake_name(name)
}

/// Type identifier, e.g. (`connection`, `start-ok`) -> `ConnectionStartOk`.
pub(crate) fn type_ident(parts: &[&str]) -> Result<Ident, GenerateError> {
    let joined = parts.join(" ");

    rust_ident(&joined.to_case(Case::Pascal), &joined)
}

/// Generated function identifier, e.g. (`decode`, `basic`, `properties`) -> `decode_basic_properties`.
pub(crate) fn fn_ident(parts: &[&str]) -> Result<Ident, GenerateError> {
    let joined = parts.join(" ");

    rust_ident(&snake_name(&joined), &joined)
}

/// Constant identifier and display name, e.g. `not-found` -> `NOT_FOUND`.
pub(crate) fn constant_name(name: &str) -> String {
    name.to_ascii_uppercase().replace(['-', ' '], "_")
}

pub(crate) fn constant_ident(name: &str) -> Result<Ident, GenerateError> {
    rust_ident(&constant_name(name), name)
}

/// `nowait`, `no-wait` and `no_wait` all name the same argument.
pub(crate) fn is_no_wait(name: &str) -> bool {
    let normalized: String = name
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect();

    normalized.eq_ignore_ascii_case("nowait")
}

// snake_name
// lowercase, with hyphens and spaces as underscores
fn snake_name(name: &str) -> String {
    name.to_ascii_lowercase().replace(['-', ' '], "_")
}

fn rust_ident(candidate: &str, source: &str) -> Result<Ident, GenerateError> {
    if !is_identifier(candidate) {
        return Err(GenerateError::InvalidName(source.to_string()));
    }

    let ident = if NON_RAW_KEYWORDS.contains(&candidate) {
        Ident::new(&format!("{candidate}_"), Span::call_site())
    } else if KEYWORDS.contains(&candidate) {
        Ident::new_raw(candidate, Span::call_site())
    } else {
        Ident::new(candidate, Span::call_site())
    };

    Ok(ident)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || (first == '_' && s.len() > 1))
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

///
/// TESTS
///
