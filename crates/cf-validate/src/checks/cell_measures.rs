//! `cell_measures` references.

use cf_model::DatasetProvider;
use cf_units::UnitSystem;

use crate::checks::{Scope, VariableView};
use crate::grammar;
use crate::issue::Issue;

pub fn check<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let Some(value) = var.attribute("cell_measures") else {
        return Vec::new();
    };
    let Some(pairs) = value.as_text().and_then(grammar::cell_measures) else {
        return vec![Issue::CellMeasuresSyntax];
    };

    let mut issues = Vec::new();
    for (measure, name) in pairs {
        let referenced = scope
            .dataset
            .dimensions_of(name)
            .filter(|_| !scope.roles.is_coordinate(name));
        match referenced {
            None => issues.push(Issue::CellMeasuresMissingVariable {
                name: name.to_string(),
            }),
            Some(dims) if !dims.iter().all(|dim| var.dimensions.contains(dim)) => {
                issues.push(Issue::CellMeasuresDimensions {
                    name: name.to_string(),
                    dimensions: var.dimensions.to_vec(),
                });
            }
            Some(_) => {}
        }

        let expected = match measure {
            "area" => "m2",
            "volume" => "m3",
            other => {
                issues.push(Issue::CellMeasuresInvalidMeasure {
                    measure: other.to_string(),
                });
                continue;
            }
        };
        let units = scope
            .dataset
            .attributes_of(name)
            .and_then(|attributes| attributes.get("units"))
            .and_then(|value| value.as_text());
        if referenced.is_some() && units != Some(expected) {
            issues.push(Issue::CellMeasuresUnits {
                measure: measure.to_string(),
                expected,
            });
        }
    }
    issues
}
