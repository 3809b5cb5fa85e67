//! Reference file path resolution.

use std::path::{Path, PathBuf};

/// Environment variable naming the standard name table.
pub const STANDARD_NAMES_ENV_VAR: &str = "CF_STANDARD_NAMES";

/// Table location used when neither a flag nor the environment names one.
pub const DEFAULT_STANDARD_NAMES: &str = "./standard_name.xml";

/// Resolve the standard name table path.
///
/// Resolution order:
/// 1. explicit path (command-line flag)
/// 2. `CF_STANDARD_NAMES` environment variable
/// 3. `./standard_name.xml`
pub fn standard_names_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var(STANDARD_NAMES_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
        _ => PathBuf::from(DEFAULT_STANDARD_NAMES),
    }
}
