//! Attribute schema: name syntax, value kind and attachment.

use cf_model::{AttrValue, Attributes, DatasetProvider};
use cf_standards::{Attachment, AttributeSchema};
use cf_units::UnitSystem;

use crate::checks::naming::is_valid_name;
use crate::checks::{Scope, VariableView};
use crate::issue::Issue;

/// Where the attribute sits and, for variables, the units it is read with.
#[derive(Debug, Clone, Copy)]
struct Owner<'a> {
    role: Attachment,
    units: Option<&'a str>,
}

fn check_attribute<U: UnitSystem>(
    schema: &AttributeSchema,
    units_system: &U,
    name: &str,
    value: &AttrValue,
    owner: Owner<'_>,
    issues: &mut Vec<Issue>,
) {
    // Declared attributes are reserved names even where they break the
    // identifier syntax (`_FillValue`).
    let Some(spec) = schema.get(name) else {
        if !is_valid_name(name) {
            issues.push(Issue::InvalidAttributeName {
                attribute: name.to_string(),
            });
        }
        return;
    };

    if value.value_kind().is_some_and(|kind| kind != spec.kind) {
        issues.push(Issue::AttributeType {
            attribute: name.to_string(),
            expected: spec.kind,
        });
    }

    if owner.role != Attachment::Global && AttributeSchema::is_time_attribute(name) {
        if !owner
            .units
            .is_some_and(|units| units_system.parses_as_time(units))
        {
            issues.push(Issue::TimeAttributeMisplaced {
                attribute: name.to_string(),
            });
        }
        return;
    }

    if !spec.allows(owner.role) {
        issues.push(Issue::AttributeAttachment {
            attribute: name.to_string(),
            role: owner.role,
        });
    }
}

pub fn check_variable<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let owner = Owner {
        role: scope.attachment(var.name),
        units: var.text("units"),
    };
    let mut issues = Vec::new();
    for (name, value) in var.attributes {
        check_attribute(
            &scope.context.schema,
            scope.context.units,
            name,
            value,
            owner,
            &mut issues,
        );
    }
    issues
}

pub fn check_global<U: UnitSystem>(
    schema: &AttributeSchema,
    units_system: &U,
    attributes: &Attributes,
) -> Vec<Issue> {
    let owner = Owner {
        role: Attachment::Global,
        units: None,
    };
    let mut issues = Vec::new();
    for (name, value) in attributes {
        check_attribute(schema, units_system, name, value, owner, &mut issues);
    }
    issues
}
