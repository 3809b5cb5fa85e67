//! `compress` attribute of compression-by-gathering index variables.

use cf_model::DatasetProvider;
use cf_units::UnitSystem;

use crate::checks::{Scope, VariableView};
use crate::grammar;
use crate::issue::Issue;

pub fn check<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let Some(value) = var.attribute("compress") else {
        return Vec::new();
    };
    if !var.element_type.is_integer() {
        return vec![Issue::CompressNotInteger];
    }
    let Some(names) = value.as_text().and_then(grammar::name_list) else {
        return vec![Issue::CompressSyntax];
    };

    let mut issues = Vec::new();
    let mut product: i64 = 1;
    for name in names {
        match scope.dataset.dimension_len(name) {
            Some(len) => product = product.saturating_mul(len as i64),
            None => issues.push(Issue::CompressMissingDimension {
                name: name.to_string(),
            }),
        }
    }

    let max = product - 1;
    if let Some(values) = scope.dataset.values_of(var.name)
        && values.iter().any(|&v| v < 0.0 || v > max as f64)
    {
        issues.push(Issue::CompressOutOfRange { max });
    }
    issues
}
