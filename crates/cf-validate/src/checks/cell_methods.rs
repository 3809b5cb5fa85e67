//! `cell_methods` syntax and names.

use std::collections::BTreeSet;

use cf_model::DatasetProvider;
use cf_units::UnitSystem;

use crate::checks::{Scope, VariableView};
use crate::grammar::cell_methods::{interval_units, parse};
use crate::issue::Issue;

pub fn check<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let Some(text) = var.text("cell_methods") else {
        return Vec::new();
    };
    let parsed = parse(text);
    let mut issues = Vec::new();

    if let Some(fragment) = &parsed.error {
        issues.push(Issue::CellMethodsSyntax {
            fragment: fragment.clone(),
        });
    }

    let mut seen = BTreeSet::new();
    for name in parsed.names() {
        let known = var.dimensions.iter().any(|dim| dim == name)
            || scope.context.names.contains(name);
        if !known {
            issues.push(Issue::CellMethodsName {
                name: name.to_string(),
            });
        }
        if !seen.insert(name) && name != "time" {
            issues.push(Issue::CellMethodsRepeated {
                name: name.to_string(),
            });
        }
    }

    if parsed.error.is_none() {
        for comment in &parsed.comments {
            let valid = interval_units(comment).is_some_and(|units| {
                units
                    .iter()
                    .all(|unit| scope.context.units.parse(unit).is_ok())
            });
            if !valid {
                issues.push(Issue::CellMethodsSyntax {
                    fragment: comment.clone(),
                });
            }
        }
    }
    issues
}
