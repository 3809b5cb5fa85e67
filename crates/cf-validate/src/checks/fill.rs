//! `_FillValue` and `missing_value`.

use cf_model::{AttrValue, DatasetProvider, ElementType};
use cf_units::UnitSystem;

use crate::checks::{Scope, VariableView};
use crate::issue::Issue;

/// Whether an attribute value has the element type of its variable.
fn same_type(value: &AttrValue, element_type: ElementType) -> bool {
    match value {
        AttrValue::Text(_) => element_type == ElementType::Char,
        AttrValue::Number { kind, .. } | AttrValue::Sequence { kind, .. } => *kind == element_type,
        AttrValue::Absent => true,
    }
}

fn role_issues<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
    attribute: &'static str,
    issues: &mut Vec<Issue>,
) {
    if scope.roles.is_boundary(var.name) {
        issues.push(Issue::FillOnBoundary { attribute });
    } else if scope.roles.is_climatology(var.name) {
        issues.push(Issue::FillOnClimatology { attribute });
    }
}

pub fn check<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    let fill = var.attribute("_FillValue");

    if let Some(fill) = fill {
        if !same_type(fill, var.element_type) {
            issues.push(Issue::FillValueType {
                element_type: var.element_type,
            });
        }
        if let (Some(value), Some(range)) = (
            fill.first_number(),
            var.attribute("valid_range").map(AttrValue::numbers),
        ) && range.len() >= 2
            && value > range[0]
            && value < range[1]
        {
            issues.push(Issue::FillValueInsideRange);
        }
        role_issues(scope, var, "_FillValue", &mut issues);
    }

    if let Some(missing) = var.attribute("missing_value").filter(|v| !v.is_absent()) {
        match fill {
            Some(fill) if fill != missing => issues.push(Issue::MissingValueDiffers),
            Some(_) => {}
            None => issues.push(Issue::MissingValueDeprecated),
        }
        if !same_type(missing, var.element_type) {
            issues.push(Issue::MissingValueType {
                element_type: var.element_type,
            });
        }
        role_issues(scope, var, "missing_value", &mut issues);
    }
    issues
}
