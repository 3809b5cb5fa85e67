//! Dimensional representation of a parsed unit.

use std::fmt;

/// Base quantities a unit can carry an exponent for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    Luminosity,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 7] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::Luminosity,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BaseDimension::Length => "m",
            BaseDimension::Mass => "kg",
            BaseDimension::Time => "s",
            BaseDimension::Current => "A",
            BaseDimension::Temperature => "K",
            BaseDimension::Amount => "mol",
            BaseDimension::Luminosity => "cd",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Largest exponent magnitude a unit may carry on any base dimension.
pub const MAX_EXPONENT: i32 = 1 << 15;

/// Exponents over the seven base dimensions. Angles are dimensionless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions([i32; 7]);

impl Dimensions {
    pub const NONE: Dimensions = Dimensions([0; 7]);

    pub fn of(base: BaseDimension) -> Self {
        let mut exponents = [0; 7];
        exponents[base.index()] = 1;
        Dimensions(exponents)
    }

    pub fn exponent(&self, base: BaseDimension) -> i32 {
        self.0[base.index()]
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|e| *e == 0)
    }

    pub fn add(&self, other: &Dimensions) -> Dimensions {
        let mut exponents = self.0;
        for (slot, e) in exponents.iter_mut().zip(other.0) {
            *slot += e;
        }
        Dimensions(exponents)
    }

    pub fn scale(&self, power: i32) -> Dimensions {
        Dimensions(self.0.map(|e| e * power))
    }

    /// `add` that fails once an exponent leaves `±MAX_EXPONENT`.
    pub fn checked_add(&self, other: &Dimensions) -> Option<Dimensions> {
        let mut exponents = self.0;
        for (slot, e) in exponents.iter_mut().zip(other.0) {
            *slot = within_range(slot.checked_add(e))?;
        }
        Some(Dimensions(exponents))
    }

    pub fn checked_scale(&self, power: i32) -> Option<Dimensions> {
        let mut exponents = self.0;
        for slot in &mut exponents {
            *slot = within_range(slot.checked_mul(power))?;
        }
        Some(Dimensions(exponents))
    }
}

fn within_range(exponent: Option<i32>) -> Option<i32> {
    exponent.filter(|e| e.abs() <= MAX_EXPONENT)
}

/// A unit as an affine map onto the coherent SI unit of its dimensions:
/// `si_value = value * scale + offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub(crate) scale: f64,
    pub(crate) offset: f64,
    pub(crate) dimensions: Dimensions,
    pub(crate) origin: Option<String>,
}

impl Unit {
    pub fn new(scale: f64, dimensions: Dimensions) -> Self {
        Self {
            scale,
            offset: 0.0,
            dimensions,
            origin: None,
        }
    }

    pub fn dimensionless(scale: f64) -> Self {
        Self::new(scale, Dimensions::NONE)
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Reference time of a `<unit> since <timestamp>` expression.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn is_time(&self) -> bool {
        self.dimensions == Dimensions::of(BaseDimension::Time)
    }

    pub fn is_convertible_to(&self, other: &Unit) -> bool {
        self.dimensions == other.dimensions
    }

    /// Product of two units. Offsets and reference times do not survive.
    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit::new(
            self.scale * other.scale,
            self.dimensions.add(&other.dimensions),
        )
    }

    pub fn powi(&self, power: i32) -> Unit {
        Unit::new(self.scale.powi(power), self.dimensions.scale(power))
    }

    /// Product whose exponents stay within `MAX_EXPONENT`.
    pub fn checked_multiply(&self, other: &Unit) -> Option<Unit> {
        let dimensions = self.dimensions.checked_add(&other.dimensions)?;
        Some(Unit::new(self.scale * other.scale, dimensions))
    }

    pub fn checked_powi(&self, power: i32) -> Option<Unit> {
        let dimensions = self.dimensions.checked_scale(power)?;
        Some(Unit::new(self.scale.powi(power), dimensions))
    }

    /// Convert `value` expressed in `self` into `target`.
    pub fn convert(&self, value: f64, target: &Unit) -> Option<f64> {
        if !self.is_convertible_to(target) {
            return None;
        }
        let si = value * self.scale + self.offset;
        Some((si - target.offset) / target.scale)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.scale != 1.0 || self.dimensions.is_dimensionless() {
            parts.push(format!("{}", self.scale));
        }
        for base in BaseDimension::ALL {
            match self.dimensions.exponent(base) {
                0 => {}
                1 => parts.push(base.symbol().to_string()),
                e => parts.push(format!("{}{}", base.symbol(), e)),
            }
        }
        f.write_str(&parts.join(" "))?;
        if self.offset != 0.0 {
            write!(f, " @ {}", self.offset)?;
        }
        if let Some(origin) = &self.origin {
            write!(f, " since {origin}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_adds_exponents() {
        let metre = Unit::new(1.0, Dimensions::of(BaseDimension::Length));
        let area = metre.multiply(&metre);
        assert_eq!(area.dimensions().exponent(BaseDimension::Length), 2);
        assert_eq!(area.to_string(), "m2");
    }

    #[test]
    fn checked_arithmetic_bounds_exponents() {
        let metre = Unit::new(1.0, Dimensions::of(BaseDimension::Length));
        let big = metre.checked_powi(MAX_EXPONENT).unwrap();
        assert!(big.checked_multiply(&metre).is_none());
        assert!(metre.checked_powi(i32::MAX).is_none());
        assert!(big.checked_powi(-1).is_some());
    }

    #[test]
    fn convert_applies_offset() {
        let kelvin = Unit::new(1.0, Dimensions::of(BaseDimension::Temperature));
        let celsius = kelvin.clone().with_offset(273.15);
        let value = celsius.convert(0.0, &kelvin);
        assert_eq!(value, Some(273.15));
    }
}
