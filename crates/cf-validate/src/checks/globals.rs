//! Global attributes.

use cf_model::Attributes;
use cf_units::UnitSystem;

use crate::checks::attributes;
use crate::context::ValidationContext;
use crate::issue::Issue;

pub fn check<U: UnitSystem>(context: &ValidationContext<'_, U>, globals: &Attributes) -> Vec<Issue> {
    let mut issues = Vec::new();
    match globals.get("Conventions") {
        None => issues.push(Issue::ConventionsMissing),
        Some(value) => {
            let accepted = value.as_text().is_some_and(|text| {
                context
                    .options
                    .conventions
                    .iter()
                    .any(|convention| convention == text.trim())
            });
            if !accepted {
                issues.push(Issue::ConventionsUnsupported {
                    value: value
                        .as_text()
                        .map_or_else(|| value.to_string(), str::to_string),
                });
            }
        }
    }
    issues.extend(attributes::check_global(
        &context.schema,
        context.units,
        globals,
    ));
    issues
}
