//! Packed data: `scale_factor` and `add_offset`.

use cf_model::ElementType;

use crate::checks::VariableView;
use crate::issue::Issue;

pub fn check(var: &VariableView<'_>) -> Vec<Issue> {
    let scale = var.attribute("scale_factor").and_then(|v| v.numeric_type());
    let offset = var.attribute("add_offset").and_then(|v| v.numeric_type());

    if let (Some(scale), Some(offset)) = (scale, offset)
        && scale != offset
    {
        return vec![Issue::PackingTypeMismatch];
    }
    let Some(packing) = scale.or(offset) else {
        return Vec::new();
    };
    if packing == var.element_type {
        return Vec::new();
    }

    let mut issues = Vec::new();
    if !packing.is_floating() {
        issues.push(Issue::PackingNotFloat);
    }
    if !var.element_type.is_integer() {
        issues.push(Issue::PackedVariableType);
    }
    if packing == ElementType::Float && var.element_type == ElementType::Int {
        issues.push(Issue::PackedIntFromFloat);
    }
    issues
}
