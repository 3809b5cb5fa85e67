//! `axis` and `positive` values, and the axis against units/positive.

use std::sync::LazyLock;

use cf_model::{AttrValue, DatasetProvider};
use cf_units::UnitSystem;
use regex::Regex;

use crate::checks::{Scope, VariableView};
use crate::interpret::{AxisBucket, interpret};
use crate::issue::Issue;

static AXIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(X|Y|Z|T)$").expect("Invalid axis regex"));

static POSITIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(up|down)$").expect("Invalid positive regex"));

fn text_or_display(value: &AttrValue) -> String {
    value
        .as_text()
        .map_or_else(|| value.to_string(), str::to_string)
}

pub fn check<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let Some(value) = var.attribute("axis") {
        match value.as_text().filter(|axis| AXIS.is_match(axis)) {
            None => issues.push(Issue::InvalidAxis {
                value: text_or_display(value),
            }),
            Some(axis) => {
                let inferred =
                    interpret(scope.context.units, var.text("units"), var.text("positive"));
                if let Some(inferred) = inferred
                    && AxisBucket::from_axis(axis) != Some(inferred)
                {
                    issues.push(Issue::AxisInconsistent {
                        axis: axis.to_string(),
                        inferred: inferred.letter(),
                    });
                }
            }
        }
    }

    if let Some(value) = var.attribute("positive")
        && !value.as_text().is_some_and(|positive| POSITIVE.is_match(positive))
    {
        issues.push(Issue::InvalidPositive {
            value: text_or_display(value),
        });
    }
    issues
}
