//! Site-specific list of unit strings accepted as-is.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{Result, StandardsError};

/// Parse a whitespace-separated list of unit strings.
pub fn parse_extra_units(text: &str) -> BTreeSet<String> {
    text.split_whitespace().map(str::to_string).collect()
}

pub fn load_extra_units(path: &Path) -> Result<BTreeSet<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    Ok(parse_extra_units(&text))
}
