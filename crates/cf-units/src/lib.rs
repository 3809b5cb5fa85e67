//! Unit algebra for the CF convention checker.
//!
//! The validation engine only talks to the [`UnitSystem`] trait; the
//! built-in [`UnitRegistry`] understands the common unit database syntax
//! (`kg m-2 s-1`, `hPa`, `degrees_north`, `days since 1990-01-01`).

mod error;
mod parser;
mod registry;
mod unit;

pub use error::UnitError;
pub use parser::is_valid_timestamp;
pub use registry::{SECONDS_PER_YEAR, UnitRegistry};
pub use unit::{BaseDimension, Dimensions, MAX_EXPONENT, Unit};

/// Operations the checker needs from a unit library.
pub trait UnitSystem {
    type Unit: Clone + std::fmt::Debug;

    /// Parse a unit string; any failure means the string is not a valid unit.
    fn parse(&self, expr: &str) -> Result<Self::Unit, UnitError>;

    fn is_time(&self, unit: &Self::Unit) -> bool;

    /// Whether values in `from` can be converted into `to`.
    fn convertible(&self, from: &Self::Unit, to: &Self::Unit) -> bool;

    fn multiply(&self, a: &Self::Unit, b: &Self::Unit) -> Self::Unit;

    /// Whether the unit is a time unit anchored to a reference time.
    fn has_calendar_reference(&self, unit: &Self::Unit) -> bool;

    /// Parse and report whether the string is a time unit.
    fn parses_as_time(&self, expr: &str) -> bool {
        self.parse(expr).is_ok_and(|unit| self.is_time(&unit))
    }

    /// Parse both strings and report whether they are convertible.
    fn strings_convertible(&self, from: &str, to: &str) -> bool {
        match (self.parse(from), self.parse(to)) {
            (Ok(from), Ok(to)) => self.convertible(&from, &to),
            _ => false,
        }
    }
}
