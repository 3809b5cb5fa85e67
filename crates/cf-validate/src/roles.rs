//! Variable role classification.
//!
//! Coordinate variables are found from their dimensions alone. The other
//! roles come from the `coordinates`, `bounds`, `climatology` and
//! `grid_mapping` attributes of the referencing variables, which are
//! cross-checked against the dataset while the sets are built.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use cf_model::{AttrValue, DatasetProvider, ElementType};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::grammar;
use crate::issue::{BoundsKind, Issue};

static SINGLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]*$").expect("Invalid variable reference regex"));

/// Role sets computed once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleSets {
    pub coordinates: BTreeSet<String>,
    pub auxiliary: BTreeSet<String>,
    pub boundaries: BTreeSet<String>,
    pub climatology: BTreeSet<String>,
    pub grid_mappings: BTreeSet<String>,
}

impl RoleSets {
    pub fn is_coordinate(&self, name: &str) -> bool {
        self.coordinates.contains(name)
    }

    pub fn is_auxiliary(&self, name: &str) -> bool {
        self.auxiliary.contains(name)
    }

    /// Coordinate or auxiliary coordinate.
    pub fn is_any_coordinate(&self, name: &str) -> bool {
        self.is_coordinate(name) || self.is_auxiliary(name)
    }

    pub fn is_boundary(&self, name: &str) -> bool {
        self.boundaries.contains(name)
    }

    pub fn is_climatology(&self, name: &str) -> bool {
        self.climatology.contains(name)
    }

    pub fn is_grid_mapping(&self, name: &str) -> bool {
        self.grid_mappings.contains(name)
    }
}

/// Result of classifying a dataset: the role sets plus the cross-reference
/// issues, each keyed by the variable carrying the faulty attribute.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub roles: RoleSets,
    pub issues: Vec<(String, Issue)>,
}

/// Whether `name` is a coordinate variable: one-dimensional along a
/// dimension of the same name.
pub fn is_coordinate_variable<D: DatasetProvider + ?Sized>(dataset: &D, name: &str) -> bool {
    dataset
        .dimensions_of(name)
        .is_some_and(|dims| dims.len() == 1 && dims[0] == name)
}

pub fn classify<D: DatasetProvider + ?Sized>(dataset: &D) -> Classification {
    let names = dataset.variable_names();
    let mut classification = Classification::default();

    for name in &names {
        if is_coordinate_variable(dataset, name) {
            classification.roles.coordinates.insert((*name).to_string());
        }
    }

    for name in &names {
        let Some(attributes) = dataset.attributes_of(name) else {
            continue;
        };
        let mut issues = Vec::new();
        if let Some(value) = attributes.get("coordinates") {
            check_coordinates(dataset, name, value, &mut classification.roles, &mut issues);
        }
        for kind in [BoundsKind::Bounds, BoundsKind::Climatology] {
            if let Some(value) = attributes.get(kind.attribute()) {
                check_bounds(
                    dataset,
                    name,
                    kind,
                    value,
                    &mut classification.roles,
                    &mut issues,
                );
            }
        }
        if let Some(value) = attributes.get("grid_mapping") {
            check_grid_mapping(dataset, name, value, &mut classification.roles, &mut issues);
        }
        classification
            .issues
            .extend(issues.into_iter().map(|issue| ((*name).to_string(), issue)));
    }

    let roles = &classification.roles;
    debug!(
        coordinates = ?roles.coordinates,
        auxiliary = ?roles.auxiliary,
        boundaries = ?roles.boundaries,
        climatology = ?roles.climatology,
        grid_mappings = ?roles.grid_mappings,
        "classified variables"
    );
    classification
}

fn check_coordinates<D: DatasetProvider + ?Sized>(
    dataset: &D,
    variable: &str,
    value: &AttrValue,
    roles: &mut RoleSets,
    issues: &mut Vec<Issue>,
) {
    let Some(references) = value.as_text().and_then(grammar::name_list) else {
        issues.push(Issue::CoordinatesSyntax {
            variable: variable.to_string(),
        });
        return;
    };
    let own_dims = dataset.dimensions_of(variable).unwrap_or_default();

    for reference in references {
        let Some(dims) = dataset.dimensions_of(reference) else {
            issues.push(Issue::CoordinatesMissingVariable {
                name: reference.to_string(),
            });
            continue;
        };
        if roles.is_coordinate(reference) {
            continue;
        }
        roles.auxiliary.insert(reference.to_string());

        if dataset.element_type(reference) == Some(ElementType::Char) {
            if dims.len() != 2 {
                issues.push(Issue::LabelDimensionCount {
                    label: reference.to_string(),
                    count: dims.len(),
                });
            } else if !own_dims.contains(&dims[0]) {
                issues.push(Issue::LabelLeadingDimension {
                    label: reference.to_string(),
                    variable: variable.to_string(),
                });
            }
        } else if !dims.iter().all(|dim| own_dims.contains(dim)) {
            issues.push(Issue::AuxDimensionsNotSubset {
                aux: reference.to_string(),
                variable: variable.to_string(),
            });
        }
    }
}

fn check_bounds<D: DatasetProvider + ?Sized>(
    dataset: &D,
    variable: &str,
    kind: BoundsKind,
    value: &AttrValue,
    roles: &mut RoleSets,
    issues: &mut Vec<Issue>,
) {
    let Some(target) = value.as_text().filter(|text| SINGLE_NAME.is_match(text)) else {
        issues.push(Issue::BoundsSyntax { kind });
        return;
    };
    let Some(bounds_dims) = dataset.dimensions_of(target) else {
        issues.push(Issue::BoundsMissingVariable {
            kind,
            name: target.to_string(),
        });
        return;
    };
    if !roles.is_coordinate(target) {
        let set = match kind {
            BoundsKind::Bounds => &mut roles.boundaries,
            BoundsKind::Climatology => &mut roles.climatology,
        };
        set.insert(target.to_string());
    }

    if !dataset
        .element_type(target)
        .is_some_and(|element_type| element_type.is_numeric())
    {
        issues.push(Issue::BoundsNotNumeric {
            kind,
            name: target.to_string(),
        });
    }

    let own_dims = dataset.dimensions_of(variable).unwrap_or_default();
    let mut dimension_error = false;
    if bounds_dims.len() != own_dims.len() + 1 {
        issues.push(Issue::BoundsDimensionCount {
            kind,
            name: target.to_string(),
        });
        dimension_error = true;
    } else if !own_dims.iter().all(|dim| bounds_dims.contains(dim)) {
        issues.push(Issue::BoundsDimensions {
            kind,
            name: target.to_string(),
        });
        dimension_error = true;
    }

    let properties: &[&'static str] = match kind {
        BoundsKind::Bounds => &["units", "standard_name"],
        BoundsKind::Climatology => &["units", "standard_name", "calendar"],
    };
    if let (Some(own), Some(theirs)) =
        (dataset.attributes_of(variable), dataset.attributes_of(target))
    {
        for &property in properties {
            if let (Some(a), Some(b)) = (own.get(property), theirs.get(property))
                && a != b
            {
                issues.push(Issue::BoundsInconsistent {
                    kind,
                    name: target.to_string(),
                    property,
                    variable: variable.to_string(),
                });
            }
        }
    }

    if !dimension_error
        && bounds_dims.len() <= 2
        && let (Some(values), Some(bounds)) =
            (dataset.values_of(variable), dataset.values_of(target))
        && !within_bounds(&values, &bounds)
    {
        issues.push(Issue::OutsideCellBounds {
            variable: variable.to_string(),
        });
    }
}

/// Whether each value lies in the closed interval of its bounds pair,
/// with the pair taken in either order.
pub fn within_bounds(values: &[f64], bounds: &[f64]) -> bool {
    values
        .iter()
        .zip(bounds.chunks_exact(2))
        .all(|(value, pair)| {
            let (low, high) = if pair[0] <= pair[1] {
                (pair[0], pair[1])
            } else {
                (pair[1], pair[0])
            };
            (low..=high).contains(value)
        })
}

fn check_grid_mapping<D: DatasetProvider + ?Sized>(
    dataset: &D,
    variable: &str,
    value: &AttrValue,
    roles: &mut RoleSets,
    issues: &mut Vec<Issue>,
) {
    let Some(target) = value.as_text().filter(|text| SINGLE_NAME.is_match(text)) else {
        issues.push(Issue::GridMappingSyntax {
            variable: variable.to_string(),
        });
        return;
    };
    if dataset.dimensions_of(target).is_none() {
        issues.push(Issue::GridMappingMissingVariable {
            name: target.to_string(),
        });
        return;
    }
    if !roles.is_coordinate(target) {
        roles.grid_mappings.insert(target.to_string());
    }
}
