//! Identifier helpers shared by the generators

use crate::generators::MemberNaming;
use heck::ToSnakeCase;

const PYTHON_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// First of `name`, `name1`, `name2`, ... accepted by `is_free`
pub fn unique_name_by(candidate: &str, is_free: impl Fn(&str) -> bool) -> String {
    if is_free(candidate) {
        return candidate.to_string();
    }
    (1..)
        .map(|n| format!("{candidate}{n}"))
        .find(|name| is_free(name))
        .unwrap_or_default()
}

/// Member name derived from a class name. Keywords get a trailing `_`.
pub fn member_name(class_name: &str, naming: MemberNaming) -> String {
    escape_keyword(derive_name(class_name, naming))
}

/// Plural member name for a collection of `class_name`
pub fn plural_member_name(class_name: &str, naming: MemberNaming) -> String {
    escape_keyword(pluralize(&derive_name(class_name, naming)))
}

fn derive_name(class_name: &str, naming: MemberNaming) -> String {
    match naming {
        MemberNaming::Lowercase => class_name.to_lowercase(),
        MemberNaming::SnakeCase => class_name.to_snake_case(),
    }
}

fn escape_keyword(name: String) -> String {
    if PYTHON_KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// English plural of a lower-case identifier
pub fn pluralize(word: &str) -> String {
    const SIBILANTS: [&str; 5] = ["s", "x", "z", "ch", "sh"];

    if SIBILANTS.iter().any(|suffix| word.ends_with(suffix)) {
        return format!("{word}es");
    }

    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if before.is_some_and(|c| c.is_ascii_alphabetic() && !"aeiou".contains(c)) {
            return format!("{stem}ies");
        }
    }

    format!("{word}s")
}
