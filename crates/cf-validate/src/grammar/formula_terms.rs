//! `formula_terms` parser: `term: variable` pairs separated by blanks.

use std::sync::LazyLock;

use regex::Regex;

static FORMULA_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+: +[A-Za-z0-9_]+ *)*$").expect("Invalid formula_terms regex")
});

/// One blank-separated token of a `formula_terms` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaToken<'a> {
    /// `name:`, with the colon stripped.
    Term(&'a str),
    Variable(&'a str),
}

/// Validate the syntax and split the value into blank-separated tokens.
///
/// Tokens ending in a colon are terms, everything else a variable name.
/// Each token is classified on its own, so `sigma: ps: PS` holds two terms
/// and one variable.
pub fn parse(text: &str) -> Option<Vec<FormulaToken<'_>>> {
    if !FORMULA_TERMS.is_match(text) {
        return None;
    }
    Some(
        text.split_whitespace()
            .map(|token| match token.strip_suffix(':') {
                Some(term) => FormulaToken::Term(term),
                None => FormulaToken::Variable(token),
            })
            .collect(),
    )
}
