//! `standard_name` and `long_name`.

use std::sync::LazyLock;

use cf_model::DatasetProvider;
use cf_units::UnitSystem;
use regex::Regex;

use crate::checks::{Scope, VariableView};
use crate::issue::Issue;

const DERIVED_PATTERNS: &[&str] = &[
    r"^(direction|magnitude|square|divergence)_of_[a-zA-Z][a-zA-Z0-9_]*$",
    r"^rate_of_change_of_[a-zA-Z][a-zA-Z0-9_]*$",
    r"^(grid_)?(northward|southward|eastward|westward)_derivative_of_[a-zA-Z][a-zA-Z0-9_]*$",
    r"^product_of_[a-zA-Z][a-zA-Z0-9_]*_and_[a-zA-Z][a-zA-Z0-9_]*$",
    r"^ratio_of_[a-zA-Z][a-zA-Z0-9_]*_to_[a-zA-Z][a-zA-Z0-9_]*$",
    r"^derivative_of_[a-zA-Z][a-zA-Z0-9_]*_wrt_[a-zA-Z][a-zA-Z0-9_]*$",
    r"^(correlation|covariance)_over_[a-zA-Z][a-zA-Z0-9_]*_of_[a-zA-Z][a-zA-Z0-9_]*_and_[a-zA-Z][a-zA-Z0-9_]*$",
    r"^histogram_over_[a-zA-Z][a-zA-Z0-9_]*_of_[a-zA-Z][a-zA-Z0-9_]*$",
    r"^probability_distribution_over_[a-zA-Z][a-zA-Z0-9_]*_of_[a-zA-Z][a-zA-Z0-9_]*$",
    r"^probability_density_function_over_[a-zA-Z][a-zA-Z0-9_]*_of_[a-zA-Z][a-zA-Z0-9_]*$",
];

static DERIVED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DERIVED_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Invalid derived standard name regex"))
        .collect()
});

/// Whether `name` follows one of the standard name transformation rules.
pub fn is_derived_name(name: &str) -> bool {
    DERIVED.iter().any(|pattern| pattern.is_match(name))
}

pub fn check<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    let roles = scope.roles;
    let exempt = roles.is_boundary(var.name)
        || roles.is_climatology(var.name)
        || roles.is_grid_mapping(var.name);
    if !var.has("standard_name") && !var.has("long_name") && !exempt {
        issues.push(Issue::MissingDescription);
    }

    if let Some(name) = var.text("standard_name") {
        if name.contains(char::is_whitespace) {
            issues.push(Issue::StandardNameWhitespace {
                name: name.to_string(),
            });
        } else if !scope.context.names.contains(name) && !is_derived_name(name) {
            issues.push(Issue::InvalidStandardName {
                name: name.to_string(),
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_names() {
        assert!(is_derived_name("rate_of_change_of_air_temperature"));
        assert!(is_derived_name("grid_eastward_derivative_of_sea_surface_height"));
        assert!(is_derived_name("ratio_of_x_to_y"));
        assert!(is_derived_name("covariance_over_time_of_u_and_v"));
        assert!(!is_derived_name("air_temperature"));
        assert!(!is_derived_name("rate_of_change_of_"));
    }
}
