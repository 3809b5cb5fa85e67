//! `cell_methods` parser.
//!
//! ```text
//! cell_methods := { group [ comment ] }
//! group        := name ":" { name ":" } method [ ("over" | "within") ("days" | "years") ]
//! comment      := "(" text ")"
//! ```
//!
//! Comments are cut out first and the text between them is parsed as a run
//! of groups. Parsing stops at the first segment that does not match; the
//! groups read before it are kept so their names can still be checked.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Statistical methods a group may name.
pub const METHODS: &[&str] = &[
    "point",
    "sum",
    "maximum",
    "median",
    "mid_range",
    "minimum",
    "mean",
    "mode",
    "standard_deviation",
    "variance",
];

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]+\)").expect("Invalid cell_methods comment regex"));

static STANDARDIZED_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\s*(?:interval:\s+\d+\s+[^\s)]+\s*)*(?:comment: .+)?\)$")
        .expect("Invalid interval comment regex")
});

static INTERVAL_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"interval:\s+\d+\s+([^\s)]+)").expect("Invalid interval unit regex")
});

static INTERVAL_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\s*interval").expect("Invalid interval start regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodGroup {
    pub names: Vec<String>,
    pub method: String,
    /// `over`/`within` qualifier with its period.
    pub qualifier: Option<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CellMethods {
    pub groups: Vec<MethodGroup>,
    /// Parenthesized comments, brackets included.
    pub comments: Vec<String>,
    /// First segment that failed to parse, trimmed.
    pub error: Option<String>,
}

impl CellMethods {
    pub fn has_method(&self, method: &str) -> bool {
        self.groups.iter().any(|group| group.method == method)
    }

    /// Names listed before the methods, across all groups.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|group| group.names.iter().map(String::as_str))
    }
}

pub fn parse(text: &str) -> CellMethods {
    let mut parsed = CellMethods::default();
    let mut segments = Vec::new();
    let mut last = 0;
    for found in COMMENT.find_iter(text) {
        segments.push(&text[last..found.start()]);
        parsed.comments.push(found.as_str().to_string());
        last = found.end();
    }
    segments.push(&text[last..]);

    for segment in segments {
        if segment.trim().is_empty() {
            continue;
        }
        match parse_segment(segment) {
            Ok(groups) => parsed.groups.extend(groups),
            Err(groups) => {
                parsed.groups.extend(groups);
                parsed.error = Some(segment.trim().to_string());
                break;
            }
        }
    }
    parsed
}

/// Unit strings of a standardized `(interval: N unit ...)` comment.
///
/// Returns `None` for comments that start with `interval` but do not follow
/// the standardized form, and an empty list for free-text comments.
pub fn interval_units(comment: &str) -> Option<Vec<&str>> {
    if !INTERVAL_START.is_match(comment) {
        return Some(Vec::new());
    }
    if !STANDARDIZED_COMMENT.is_match(comment) {
        return None;
    }
    Some(
        INTERVAL_UNIT
            .captures_iter(comment)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Colon,
}

fn tokenize(segment: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for chunk in segment.split_whitespace() {
        let mut rest = chunk;
        while let Some(index) = rest.find(':') {
            if index > 0 {
                tokens.push(Token::Word(&rest[..index]));
            }
            tokens.push(Token::Colon);
            rest = &rest[index + 1..];
        }
        if !rest.is_empty() {
            tokens.push(Token::Word(rest));
        }
    }
    tokens
}

/// Parse one comment-free segment. On failure the groups read before the
/// error are returned as the error value.
fn parse_segment(segment: &str) -> Result<Vec<MethodGroup>, Vec<MethodGroup>> {
    let tokens = tokenize(segment);
    let mut groups = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
        match parse_group(&tokens, &mut pos) {
            Some(group) => groups.push(group),
            None => return Err(groups),
        }
    }
    Ok(groups)
}

fn parse_group(tokens: &[Token<'_>], pos: &mut usize) -> Option<MethodGroup> {
    let mut names = Vec::new();
    while let (Some(Token::Word(name)), Some(Token::Colon)) =
        (tokens.get(*pos), tokens.get(*pos + 1))
    {
        names.push((*name).to_string());
        *pos += 2;
    }
    if names.is_empty() {
        return None;
    }

    let Some(Token::Word(method)) = tokens.get(*pos) else {
        return None;
    };
    if !METHODS.contains(method) {
        return None;
    }
    *pos += 1;

    let mut qualifier = None;
    if let Some(Token::Word(word)) = tokens.get(*pos)
        && matches!(*word, "over" | "within")
        && tokens.get(*pos + 1) != Some(&Token::Colon)
    {
        let Some(Token::Word(period)) = tokens.get(*pos + 1) else {
            return None;
        };
        if !matches!(*period, "days" | "years") {
            return None;
        }
        qualifier = Some(((*word).to_string(), (*period).to_string()));
        *pos += 2;
    }

    Some(MethodGroup {
        names,
        method: (*method).to_string(),
        qualifier,
    })
}
