//! `formula_terms` of dimensionless vertical coordinates.

use cf_model::DatasetProvider;
use cf_units::UnitSystem;

use crate::checks::{Scope, VariableView};
use crate::grammar::formula_terms::{FormulaToken, parse};
use crate::issue::Issue;

pub fn check<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let Some(value) = var.attribute("formula_terms") else {
        return Vec::new();
    };
    let Some(standard_name) = var.text("standard_name") else {
        return vec![Issue::FormulaNoStandardName];
    };
    let formulas = &scope.context.formulas;
    let Some(family) = formulas.family(standard_name) else {
        return vec![Issue::FormulaUnknown {
            standard_name: standard_name.to_string(),
        }];
    };
    let Some(tokens) = value.as_text().and_then(parse) else {
        return vec![Issue::FormulaTermsSyntax];
    };

    tokens
        .into_iter()
        .filter_map(|token| match token {
            FormulaToken::Term(term) if !formulas.has_term(family, term) => {
                Some(Issue::FormulaTermMissing {
                    term: term.to_string(),
                })
            }
            FormulaToken::Variable(name) if scope.dataset.dimensions_of(name).is_none() => {
                Some(Issue::FormulaVariableMissing {
                    name: name.to_string(),
                })
            }
            _ => None,
        })
        .collect()
}
