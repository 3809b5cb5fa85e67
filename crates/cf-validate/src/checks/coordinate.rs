//! Coordinate variable shape and values.

use cf_model::DatasetProvider;
use cf_units::UnitSystem;

use crate::checks::{Scope, VariableView};
use crate::issue::Issue;

/// A multi-dimensional variable should not share its name with one of its
/// dimensions.
pub fn check_multidimensional(var: &VariableView<'_>) -> Vec<Issue> {
    if var.dimensions.len() > 1 && var.dimensions.iter().any(|dim| dim == var.name) {
        vec![Issue::MultiDimCoordinate]
    } else {
        Vec::new()
    }
}

/// Whether the values strictly increase or strictly decrease, the direction
/// being set by the first pair.
pub fn is_strictly_monotonic(values: &[f64]) -> bool {
    let Some(first) = values.windows(2).next() else {
        return true;
    };
    let increasing = first[1] > first[0];
    values.windows(2).all(|pair| {
        if increasing {
            pair[1] > pair[0]
        } else {
            pair[1] < pair[0]
        }
    })
}

pub fn check_monotonic<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    match scope.dataset.values_of(var.name) {
        Some(values) if !is_strictly_monotonic(&values) => vec![Issue::NotMonotonic {
            variable: var.name.to_string(),
        }],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_sequences() {
        assert!(is_strictly_monotonic(&[1.0, 2.0, 3.0, 4.0]));
        assert!(is_strictly_monotonic(&[4.0, 3.0, 2.0, 1.0]));
        assert!(is_strictly_monotonic(&[7.0]));
        assert!(is_strictly_monotonic(&[]));
        assert!(!is_strictly_monotonic(&[1.0, 2.0, 2.0, 3.0]));
        assert!(!is_strictly_monotonic(&[1.0, 3.0, 2.0]));
        assert!(!is_strictly_monotonic(&[1.0, 1.0]));
    }
}
