//! `valid_range` excludes `valid_min` and `valid_max`.

use crate::checks::VariableView;
use crate::issue::Issue;

pub fn check(var: &VariableView<'_>) -> Vec<Issue> {
    if var.has("valid_range") && (var.has("valid_min") || var.has("valid_max")) {
        vec![Issue::ValidRangeExclusive]
    } else {
        Vec::new()
    }
}
