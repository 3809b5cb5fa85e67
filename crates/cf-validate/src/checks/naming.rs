//! Identifier syntax.

use std::sync::LazyLock;

use cf_model::CaseInsensitiveSet;
use regex::Regex;

use crate::issue::Issue;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("Invalid name regex"));

/// Whether `name` starts with a letter and continues with letters, digits
/// and underscores.
pub fn is_valid_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// Name syntax, then the case-insensitive clash with variables seen so far.
pub fn check(name: &str, seen: &mut CaseInsensitiveSet) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !is_valid_name(name) {
        issues.push(Issue::InvalidVariableName {
            name: name.to_string(),
        });
    }
    if let Some(existing) = seen.insert(name) {
        issues.push(Issue::VariableClash {
            name: name.to_string(),
            existing: existing.to_string(),
        });
    }
    issues
}
