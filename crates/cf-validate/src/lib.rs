//! CF metadata convention validation engine.
//!
//! [`validate`] classifies the variables of a dataset into roles, checks the
//! global attributes, then runs every per-variable check and collects the
//! results into a [`ValidationReport`]. The dataset is only read through
//! [`DatasetProvider`] and unit arithmetic goes through [`UnitSystem`].

pub mod checks;
mod context;
pub mod grammar;
mod interpret;
mod issue;
mod report;
mod roles;

pub use context::{ValidationContext, ValidationOptions};
pub use interpret::{AxisBucket, interpret};
pub use issue::{BoundsKind, Issue};
pub use report::{ValidationReport, write_report_json};
pub use roles::{Classification, RoleSets, classify, is_coordinate_variable, within_bounds};

use cf_model::{CaseInsensitiveSet, DatasetProvider, Diagnostics};
use cf_units::UnitSystem;
use tracing::{info, info_span};

use crate::checks::{Scope, VariableView};

/// Validate a dataset against the conventions.
///
/// Global diagnostics come first, then the cross-reference diagnostics of
/// the classifier, then each variable's checks in declared order. The
/// dataset is never modified, so repeated runs give the same report.
pub fn validate<D: DatasetProvider + ?Sized, U: UnitSystem>(
    dataset: &D,
    context: &ValidationContext<'_, U>,
) -> ValidationReport {
    let names = dataset.variable_names();
    let _span = info_span!("validate", variables = names.len()).entered();
    let mut diagnostics = Diagnostics::new();

    diagnostics.extend(
        checks::globals::check(context, dataset.global_attributes())
            .into_iter()
            .map(|issue| issue.into_diagnostic(None)),
    );

    let classification = classify(dataset);
    diagnostics.extend(
        classification
            .issues
            .into_iter()
            .map(|(variable, issue)| issue.into_diagnostic(Some(variable.as_str()))),
    );

    let scope = Scope {
        dataset,
        context,
        roles: &classification.roles,
    };
    let mut seen = CaseInsensitiveSet::default();
    for name in &names {
        let _variable_span = info_span!("variable", name = %name).entered();
        let Some(view) = VariableView::from_provider(dataset, name) else {
            continue;
        };
        diagnostics.extend(
            checks::run_variable(&scope, &view, &mut seen)
                .into_iter()
                .map(|issue| issue.into_diagnostic(Some(*name))),
        );
    }

    info!(
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        "validation complete"
    );

    ValidationReport {
        source: dataset.source_name().map(str::to_string),
        table_version: context.names.version().map(str::to_string),
        table_last_modified: context.names.last_modified().map(str::to_string),
        variables: names.iter().map(|name| (*name).to_string()).collect(),
        diagnostics,
    }
}
