//! Grid mapping variables.

use crate::checks::VariableView;
use crate::issue::Issue;

/// Mappings defined in CF-1.0, Appendix F.
pub const GRID_MAPPING_NAMES: &[&str] = &[
    "albers_conical_equal_area",
    "azimuthal_equidistant",
    "lambert_azimuthal_equal_area",
    "lambert_conformal_conic",
    "polar_stereographic",
    "rotated_latitude_longitude",
    "stereographic",
    "transverse_mercator",
];

pub fn check(var: &VariableView<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    match var.attribute("grid_mapping_name") {
        None => issues.push(Issue::GridMappingNameMissing),
        Some(value) => {
            let name = value.as_text().unwrap_or_default();
            if !GRID_MAPPING_NAMES.contains(&name) {
                issues.push(Issue::GridMappingNameInvalid {
                    name: value.as_text().map_or_else(|| value.to_string(), str::to_string),
                });
            }
        }
    }
    if !var.dimensions.is_empty() {
        issues.push(Issue::GridMappingDimensions);
    }
    issues
}
