//! Time coordinate attributes.

use cf_model::{AttrValue, DatasetProvider};
use cf_units::UnitSystem;

use crate::checks::{Scope, VariableView};
use crate::issue::Issue;

pub const STANDARD_CALENDARS: &[&str] = &[
    "gregorian",
    "standard",
    "proleptic_gregorian",
    "noleap",
    "365_day",
    "all_leap",
    "366_day",
    "360_day",
    "julian",
    "none",
];

pub fn is_standard_calendar(calendar: &str) -> bool {
    STANDARD_CALENDARS
        .iter()
        .any(|standard| standard.eq_ignore_ascii_case(calendar.trim()))
}

fn is_integer_scalar(value: &AttrValue) -> bool {
    matches!(value, AttrValue::Number { kind, .. } if kind.is_integer())
}

pub fn check<D: DatasetProvider + ?Sized, U: UnitSystem>(
    scope: &Scope<'_, D, U>,
    var: &VariableView<'_>,
) -> Vec<Issue> {
    let system = scope.context.units;
    let Some(units) = var.text("units") else {
        return Vec::new();
    };
    let Ok(unit) = system.parse(units) else {
        return Vec::new();
    };
    if !system.is_time(&unit) {
        return Vec::new();
    }

    let mut issues = Vec::new();
    if let Some(calendar) = var.text("calendar") {
        if !is_standard_calendar(calendar) {
            if !var.has("month_lengths") {
                issues.push(Issue::NonStandardCalendar {
                    calendar: calendar.to_string(),
                });
            }
        } else if var.has("month_lengths") || var.has("leap_year") || var.has("leap_month") {
            issues.push(Issue::CalendarAttributesConflict);
        }
    }

    if let Some(lengths) = var.attribute("month_lengths") {
        let valid = lengths.numeric_type().is_some_and(|kind| kind.is_integer())
            && lengths.numbers().len() == 12;
        if !valid {
            issues.push(Issue::MonthLengths);
        }
    }

    if let Some(leap_year) = var.attribute("leap_year")
        && !is_integer_scalar(leap_year)
    {
        issues.push(Issue::LeapYear);
    }

    if let Some(leap_month) = var.attribute("leap_month") {
        let valid = is_integer_scalar(leap_month)
            && leap_month
                .first_number()
                .is_some_and(|month| (1.0..=12.0).contains(&month));
        if !valid {
            issues.push(Issue::LeapMonth);
        }
        if !var.has("leap_year") {
            issues.push(Issue::LeapMonthIgnored);
        }
    }

    if !system.has_calendar_reference(&unit) {
        issues.push(Issue::TimeReference {
            units: units.to_string(),
        });
    }
    issues
}
