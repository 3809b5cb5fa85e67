//! Validation check modules.
//!
//! Each module checks one concern of a variable and returns the issues it
//! found; [`run_variable`] runs them in a fixed order.

pub mod attributes;
pub mod axis;
pub mod cell_measures;
pub mod cell_methods;
pub mod compress;
pub mod coordinate;
pub mod description;
pub mod dimensions;
pub mod fill;
pub mod formula_terms;
pub mod globals;
pub mod grid_mapping;
pub mod naming;
pub mod packing;
pub mod range;
pub mod time;
pub mod units;

use cf_model::{AttrValue, Attributes, CaseInsensitiveSet, DatasetProvider, ElementType};
use cf_standards::Attachment;
use cf_units::UnitSystem;

use crate::context::ValidationContext;
use crate::issue::Issue;
use crate::roles::RoleSets;

/// Read-only state shared by every check of a run.
pub struct Scope<'a, D: DatasetProvider + ?Sized, U: UnitSystem> {
    pub dataset: &'a D,
    pub context: &'a ValidationContext<'a, U>,
    pub roles: &'a RoleSets,
}

/// One variable as seen by the checks.
#[derive(Debug, Clone, Copy)]
pub struct VariableView<'a> {
    pub name: &'a str,
    pub dimensions: &'a [String],
    pub element_type: ElementType,
    pub attributes: &'a Attributes,
}

impl<'a> VariableView<'a> {
    pub fn from_provider<D: DatasetProvider + ?Sized>(dataset: &'a D, name: &'a str) -> Option<Self> {
        Some(Self {
            name,
            dimensions: dataset.dimensions_of(name)?,
            element_type: dataset.element_type(name)?,
            attributes: dataset.attributes_of(name)?,
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&'a AttrValue> {
        self.attributes.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&'a str> {
        self.attribute(name).and_then(AttrValue::as_text)
    }

    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

impl<D: DatasetProvider + ?Sized, U: UnitSystem> Scope<'_, D, U> {
    /// Attachment role of a variable for the attribute schema.
    pub fn attachment(&self, variable: &str) -> Attachment {
        if self.roles.is_any_coordinate(variable) {
            Attachment::Coordinate
        } else {
            Attachment::Data
        }
    }
}

/// Run every per-variable check on `var`, in order. `seen` collects the
/// variable names checked so far.
pub fn run_variable<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
    seen: &mut CaseInsensitiveSet,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    let is_coordinate = scope.roles.is_coordinate(var.name);

    // 1. Variable name syntax and case-insensitive clash
    issues.extend(naming::check(var.name, seen));

    // 2. Dimension order of non-coordinate variables
    if !is_coordinate {
        issues.extend(dimensions::check(scope, var));
    }

    // 3. standard_name / long_name
    issues.extend(description::check(scope, var));

    // 4. Attribute schema
    issues.extend(attributes::check_variable(scope, var));

    // 5. Units
    issues.extend(units::check(scope, var));

    // 6. valid_range exclusivity
    issues.extend(range::check(var));

    // 7. _FillValue and missing_value
    issues.extend(fill::check(scope, var));

    // 8. axis and positive
    issues.extend(axis::check(scope, var));

    // 9. cell_methods
    issues.extend(cell_methods::check(scope, var));

    // 10. cell_measures
    issues.extend(cell_measures::check(scope, var));

    // 11. formula_terms
    issues.extend(formula_terms::check(scope, var));

    // 12. compress
    issues.extend(compress::check(scope, var));

    // 13. scale_factor / add_offset
    issues.extend(packing::check(var));

    // 14. Coordinate variables
    issues.extend(coordinate::check_multidimensional(var));
    if is_coordinate {
        issues.extend(coordinate::check_monotonic(scope, var));
    }

    // 15. Grid mapping variables
    if scope.roles.is_grid_mapping(var.name) {
        issues.extend(grid_mapping::check(var));
    }

    // 16. Time coordinate variables
    if is_coordinate {
        issues.extend(time::check(scope, var));
    }

    issues
}
