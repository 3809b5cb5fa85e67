//! Dimension order of data variables.

use std::collections::BTreeSet;

use cf_model::DatasetProvider;
use cf_units::UnitSystem;

use crate::checks::{Scope, VariableView};
use crate::interpret::{AxisBucket, interpret};
use crate::issue::Issue;

/// Axis of the coordinate variable behind a dimension. An explicit `axis`
/// attribute wins over units/positive inference.
fn bucket_of<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    dimension: &str,
) -> Option<AxisBucket> {
    let attributes = scope.dataset.attributes_of(dimension)?;
    let text = |name: &str| attributes.get(name).and_then(|value| value.as_text());
    if attributes.contains_key("axis") {
        return text("axis").and_then(AxisBucket::from_axis);
    }
    interpret(scope.context.units, text("units"), text("positive"))
}

pub fn check<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    if var.dimensions.len() < 2 {
        return Vec::new();
    }
    let mut issues = Vec::new();
    let mut found = BTreeSet::new();
    let mut last: Option<AxisBucket> = None;
    let mut out_of_order = false;

    for dimension in var.dimensions {
        let Some(bucket) = bucket_of(scope, dimension) else {
            continue;
        };
        if !found.insert(bucket) {
            issues.push(Issue::DuplicateAxis {
                axis: bucket.letter(),
            });
        }
        match last {
            Some(previous) if bucket < previous => out_of_order = true,
            _ => last = Some(bucket),
        }
    }
    if out_of_order {
        issues.push(Issue::DimensionOrder);
    }

    let distinct: BTreeSet<&String> = var.dimensions.iter().collect();
    if distinct.len() != var.dimensions.len() {
        issues.push(Issue::RepeatedDimensions);
    }
    issues
}
