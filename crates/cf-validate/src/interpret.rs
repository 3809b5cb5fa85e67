//! Coordinate type inference from `units` and `positive`.

use std::fmt;

use cf_units::UnitSystem;
use serde::Serialize;

const VERTICAL_UNITS: &[&str] = &["level", "layer", "sigma_level"];

const NORTH_UNITS: &[&str] = &[
    "degrees_north",
    "degree_north",
    "degrees_N",
    "degree_N",
    "degreesN",
    "degreeN",
];

const EAST_UNITS: &[&str] = &[
    "degrees_east",
    "degree_east",
    "degrees_E",
    "degree_E",
    "degreesE",
    "degreeE",
];

/// Space/time axis of a coordinate, in the order dimensions should appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AxisBucket {
    T,
    Z,
    Y,
    X,
}

impl AxisBucket {
    /// Parse an `axis` attribute value, ignoring case.
    pub fn from_axis(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "T" => Some(AxisBucket::T),
            "Z" => Some(AxisBucket::Z),
            "Y" => Some(AxisBucket::Y),
            "X" => Some(AxisBucket::X),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            AxisBucket::T => 'T',
            AxisBucket::Z => 'Z',
            AxisBucket::Y => 'Y',
            AxisBucket::X => 'X',
        }
    }
}

impl fmt::Display for AxisBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

fn is_up_or_down(positive: &str) -> bool {
    let lower = positive.to_ascii_lowercase();
    lower.starts_with("up") || lower.starts_with("down")
}

/// Infer the axis a coordinate lies along, or `None` when it cannot be
/// interpreted as a space/time coordinate.
pub fn interpret<U: UnitSystem + ?Sized>(
    units_system: &U,
    units: Option<&str>,
    positive: Option<&str>,
) -> Option<AxisBucket> {
    let Some(units) = units else {
        return positive
            .filter(|positive| is_up_or_down(positive))
            .map(|_| AxisBucket::Z);
    };
    if VERTICAL_UNITS.contains(&units) {
        return Some(AxisBucket::Z);
    }
    let unit = units_system.parse(units).ok()?;
    if units_system.is_time(&unit) {
        return Some(AxisBucket::T);
    }
    if positive.is_some_and(is_up_or_down) {
        return Some(AxisBucket::Z);
    }
    if units_system
        .parse("Pa")
        .is_ok_and(|pascal| units_system.convertible(&unit, &pascal))
    {
        return Some(AxisBucket::Z);
    }
    if NORTH_UNITS.iter().any(|prefix| units.starts_with(prefix)) {
        return Some(AxisBucket::Y);
    }
    if EAST_UNITS.iter().any(|prefix| units.starts_with(prefix)) {
        return Some(AxisBucket::X);
    }
    None
}

#[cfg(test)]
mod tests {
    use cf_units::UnitRegistry;

    use super::*;

    #[test]
    fn units_decide_the_axis() {
        let units = UnitRegistry::new();
        assert_eq!(
            interpret(&units, Some("days since 1990-01-01"), None),
            Some(AxisBucket::T)
        );
        assert_eq!(interpret(&units, Some("hPa"), None), Some(AxisBucket::Z));
        assert_eq!(interpret(&units, Some("m"), Some("UP")), Some(AxisBucket::Z));
        assert_eq!(
            interpret(&units, Some("degrees_north"), None),
            Some(AxisBucket::Y)
        );
        assert_eq!(interpret(&units, Some("degreeE"), None), Some(AxisBucket::X));
        assert_eq!(interpret(&units, Some("m"), None), None);
        assert_eq!(interpret(&units, Some("sigma_level"), None), Some(AxisBucket::Z));
    }

    #[test]
    fn positive_alone_is_vertical() {
        let units = UnitRegistry::new();
        assert_eq!(interpret(&units, None, Some("down")), Some(AxisBucket::Z));
        assert_eq!(interpret(&units, None, None), None);
    }

    #[test]
    fn buckets_order_time_first() {
        assert!(AxisBucket::T < AxisBucket::Z);
        assert!(AxisBucket::Y < AxisBucket::X);
        assert_eq!(AxisBucket::from_axis("x"), Some(AxisBucket::X));
        assert_eq!(AxisBucket::from_axis("W"), None);
    }
}
