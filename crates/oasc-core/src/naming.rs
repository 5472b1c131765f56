//! Identifier casing and escaping.
//!
//! Every model producer goes through these functions, so a name is spelled
//! the same way wherever it appears: as a type, a field, a method, or a
//! module. The functions are pure and hold no state.

use std::collections::HashSet;

use heck::{ToPascalCase, ToSnakeCase};

/// Rust keywords, including reserved and edition-2024 keywords.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that can't be written as raw identifiers.
const NOT_RAW: &[&str] = &["crate", "self", "Self", "super", "_"];

/// The prefix used to escape names that can't be raw identifiers,
/// and to disambiguate colliding field names.
pub const ESCAPE_PREFIX: char = '_';

/// Converts a schema or tag name to a `PascalCase` type name.
pub fn type_name(name: &str) -> String {
    escape(&sanitize(name).to_pascal_case())
}

/// Converts a property, parameter, or operation name to a `snake_case`
/// field or method name.
pub fn field_name(name: &str) -> String {
    escape(&sanitize(name).to_snake_case())
}

/// Converts a name to a `snake_case` module name. Module names are also
/// file names, so they're never raw identifiers.
pub fn module_name(name: &str) -> String {
    let snake = sanitize(name).to_snake_case();
    if KEYWORDS.contains(&snake.as_str()) || starts_with_digit(&snake) {
        format!("{ESCAPE_PREFIX}{snake}")
    } else {
        snake
    }
}

/// Escapes a cased identifier if it's a keyword or starts with a digit.
///
/// Keywords become raw identifiers (`r#type`); keywords that can't be raw,
/// and identifiers with a leading digit, get [`ESCAPE_PREFIX`].
pub fn escape(ident: &str) -> String {
    if NOT_RAW.contains(&ident) || starts_with_digit(ident) {
        format!("{ESCAPE_PREFIX}{ident}")
    } else if KEYWORDS.contains(&ident) {
        format!("r#{ident}")
    } else {
        ident.to_string()
    }
}

/// Strips the raw identifier prefix, for use in file names and string literals.
pub fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Cases and escapes each name, then resolves collisions by prefixing
/// later names with [`ESCAPE_PREFIX`] until they're unique.
///
/// The output has the same length and order as the input.
pub fn unique_field_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|name| {
            let mut candidate = field_name(name);
            while !seen.insert(unraw(&candidate).to_string()) {
                candidate = format!("{ESCAPE_PREFIX}{}", unraw(&candidate));
            }
            candidate
        })
        .collect()
}

/// Cases each name as a type, then resolves collisions by numbering later
/// names (`PetsApi`, `PetsApi2`) until their module names are unique.
///
/// Names in `reserved` are already taken. A prefix wouldn't help here:
/// module names drop it again.
pub fn unique_type_names<'a>(
    reserved: &[&str],
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut seen: HashSet<String> = reserved.iter().map(|name| module_name(name)).collect();
    names
        .into_iter()
        .map(|name| {
            let base = type_name(name);
            let mut candidate = base.clone();
            let mut n = 1;
            while !seen.insert(module_name(&candidate)) {
                n += 1;
                candidate = format!("{base}{n}");
            }
            candidate
        })
        .collect()
}

/// Replaces runs of non-alphanumeric characters with a single `_`,
/// so that `heck` sees word boundaries.
fn sanitize(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}

fn starts_with_digit(ident: &str) -> bool {
    ident.chars().next().is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name() {
        assert_eq!(type_name("pet"), "Pet");
        assert_eq!(type_name("pet-store"), "PetStore");
        assert_eq!(type_name("application/json"), "ApplicationJson");
        assert_eq!(type_name("3dModel"), "_3dModel");
        assert_eq!(type_name("self"), "_Self");
    }

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("petId"), "pet_id");
        assert_eq!(field_name("Content-Type"), "content_type");
        assert_eq!(field_name("type"), "r#type");
        assert_eq!(field_name("self"), "_self");
        assert_eq!(field_name("2fa"), "_2fa");
        assert_eq!(field_name("$"), "unnamed");
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("PetOwner"), "pet_owner");
        assert_eq!(module_name("type"), "_type");
    }

    #[test]
    fn test_unique_field_names() {
        let names = unique_field_names(["fooBar", "foo_bar", "foo-bar", "type"]);
        assert_eq!(names, ["foo_bar", "_foo_bar", "__foo_bar", "r#type"]);
    }

    #[test]
    fn test_unique_type_names() {
        let names = unique_type_names(&["Api"], ["_api", "Pets_api", "pets_api", "pets-api"]);
        assert_eq!(names, ["Api2", "PetsApi", "PetsApi2", "PetsApi3"]);
    }

    #[test]
    fn test_unique_field_names_with_escaped_collision() {
        // `_self` is both an escaped keyword and a cased name.
        let names = unique_field_names(["self", "_self"]);
        assert_eq!(names, ["_self", "__self"]);
    }
}
