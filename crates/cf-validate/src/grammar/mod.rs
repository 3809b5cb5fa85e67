//! Parsers for the attribute mini-languages.

pub mod cell_methods;
pub mod formula_terms;

use std::sync::LazyLock;

use regex::Regex;

static NAME_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_ ]*$").expect("Invalid name list regex"));

static CELL_MEASURES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]+: +([a-zA-Z0-9_ ]+:?)*( +[a-zA-Z0-9_]+)?)$")
        .expect("Invalid cell_measures regex")
});

/// Blank-separated list of names, as used by `coordinates` and `compress`.
pub fn name_list(text: &str) -> Option<Vec<&str>> {
    NAME_LIST
        .is_match(text)
        .then(|| text.split_whitespace().collect())
}

/// `measure: variable` pairs of a `cell_measures` value.
///
/// Tokens are paired in order; an unpaired trailing token is dropped.
pub fn cell_measures(text: &str) -> Option<Vec<(&str, &str)>> {
    if !CELL_MEASURES.is_match(text) {
        return None;
    }
    let tokens: Vec<&str> = text.split_whitespace().collect();
    Some(
        tokens
            .chunks_exact(2)
            .map(|pair| (pair[0].trim_end_matches(':'), pair[1]))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_lists() {
        assert_eq!(name_list("lat lon"), Some(vec!["lat", "lon"]));
        assert_eq!(name_list("lat,lon"), None);
    }

    #[test]
    fn measures_pair_up() {
        assert_eq!(
            cell_measures("area: cellarea volume: cellvol"),
            Some(vec![("area", "cellarea"), ("volume", "cellvol")])
        );
        assert_eq!(
            cell_measures("area: cellarea volume:"),
            Some(vec![("area", "cellarea")])
        );
        assert_eq!(cell_measures("area cellarea"), None);
    }
}
