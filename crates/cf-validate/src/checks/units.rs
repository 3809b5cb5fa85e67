//! `units` syntax and consistency with the standard name table.

use cf_model::{DatasetProvider, ElementType};
use cf_units::UnitSystem;

use crate::checks::{Scope, VariableView};
use crate::grammar::cell_methods;
use crate::issue::Issue;

const DEPRECATED_UNITS: &[&str] = &["level", "layer", "sigma_level"];

pub fn check<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let Some(value) = var.attribute("units") else {
        return missing_units(scope, var);
    };
    let Some(units) = value.as_text() else {
        return vec![Issue::UnitsNotString];
    };

    if DEPRECATED_UNITS.contains(&units) {
        return vec![Issue::DeprecatedUnits {
            units: units.to_string(),
        }];
    }
    if units == "month" || units == "year" {
        return vec![Issue::CautionaryUnits {
            units: units.to_string(),
        }];
    }
    if scope.context.options.extra_units.contains(units) {
        return Vec::new();
    }

    let system = scope.context.units;
    let Ok(declared) = system.parse(units) else {
        return vec![Issue::InvalidUnits {
            units: units.to_string(),
        }];
    };

    let Some(standard_name) = var.text("standard_name") else {
        return Vec::new();
    };
    let Some(canonical) = scope.context.names.lookup(standard_name) else {
        return Vec::new();
    };
    let canonical_expr = if canonical.is_empty() { "1" } else { canonical };
    let Ok(canonical_unit) = system.parse(canonical_expr) else {
        return Vec::new();
    };
    let variance = var
        .text("cell_methods")
        .is_some_and(|text| cell_methods::parse(text).has_method("variance"));
    let expected = if variance {
        system.multiply(&canonical_unit, &canonical_unit)
    } else {
        canonical_unit
    };

    if system.convertible(&declared, &expected) {
        Vec::new()
    } else {
        vec![Issue::UnitsInconsistent {
            units: units.to_string(),
            standard_name: standard_name.to_string(),
            canonical: canonical.to_string(),
        }]
    }
}

/// Coordinates need units unless they are labels or vertical coordinates
/// described by `positive` or `formula_terms`.
fn missing_units<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let needs_units = scope.roles.is_any_coordinate(var.name)
        && var.element_type != ElementType::Char
        && !var.has("positive")
        && !var.has("formula_terms");
    if needs_units {
        vec![Issue::MissingUnits]
    } else {
        Vec::new()
    }
}
