//! Built-in table of named units and prefixes.

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::error::UnitError;
use crate::parser;
use crate::unit::{BaseDimension, Dimensions, Unit};
use crate::UnitSystem;

const SYMBOL_PREFIXES: &[(&str, f64)] = &[
    ("da", 1e1),
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
    ("a", 1e-18),
    ("z", 1e-21),
    ("y", 1e-24),
];

const NAME_PREFIXES: &[(&str, f64)] = &[
    ("yotta", 1e24),
    ("zetta", 1e21),
    ("exa", 1e18),
    ("peta", 1e15),
    ("tera", 1e12),
    ("giga", 1e9),
    ("mega", 1e6),
    ("kilo", 1e3),
    ("hecto", 1e2),
    ("deka", 1e1),
    ("deca", 1e1),
    ("deci", 1e-1),
    ("centi", 1e-2),
    ("milli", 1e-3),
    ("micro", 1e-6),
    ("nano", 1e-9),
    ("pico", 1e-12),
    ("femto", 1e-15),
    ("atto", 1e-18),
    ("zepto", 1e-21),
    ("yocto", 1e-24),
];

/// Seconds in a tropical year, the `year` of the unit database.
pub const SECONDS_PER_YEAR: f64 = 365.242_198_781 * 86_400.0;

/// Dimensional-analysis implementation of [`UnitSystem`].
///
/// Symbols are matched case-sensitively and only take symbol prefixes
/// (`hPa`, `km`); names are matched case-insensitively, accept a plural `s`
/// and take name prefixes (`millibar`, `kilometres`).
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    symbols: HashMap<String, Unit>,
    names: HashMap<String, Unit>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            symbols: HashMap::new(),
            names: HashMap::new(),
        };
        registry.define_si();
        registry.define_common();
        registry
    }

    /// Add (or replace) a unit under the given symbols and names.
    pub fn define(&mut self, symbols: &[&str], names: &[&str], unit: Unit) {
        for symbol in symbols {
            self.symbols.insert((*symbol).to_string(), unit.clone());
        }
        for name in names {
            self.names.insert(name.to_lowercase(), unit.clone());
        }
    }

    /// Resolve a single identifier such as `km`, `hours` or `degC`.
    pub fn lookup(&self, ident: &str) -> Option<Unit> {
        if let Some(unit) = self.symbols.get(ident) {
            return Some(unit.clone());
        }
        if let Some(unit) = self.lookup_name(&ident.to_lowercase()) {
            return Some(unit);
        }
        for (prefix, factor) in SYMBOL_PREFIXES {
            if let Some(rest) = ident.strip_prefix(prefix)
                && let Some(unit) = self.symbols.get(rest)
            {
                return Some(prefixed(unit, *factor));
            }
        }
        let lower = ident.to_lowercase();
        for (prefix, factor) in NAME_PREFIXES {
            if let Some(rest) = lower.strip_prefix(prefix)
                && let Some(unit) = self.lookup_name(rest)
            {
                return Some(prefixed(&unit, *factor));
            }
        }
        None
    }

    fn lookup_name(&self, lower: &str) -> Option<Unit> {
        if let Some(unit) = self.names.get(lower) {
            return Some(unit.clone());
        }
        let singular = lower
            .strip_suffix("es")
            .filter(|stem| self.names.contains_key(*stem))
            .or_else(|| lower.strip_suffix('s'))?;
        self.names.get(singular).cloned()
    }

    fn define_si(&mut self) {
        let metre = base(BaseDimension::Length);
        let kilogram = base(BaseDimension::Mass);
        let second = base(BaseDimension::Time);
        let ampere = base(BaseDimension::Current);
        let kelvin = base(BaseDimension::Temperature);

        self.define(&["m"], &["meter", "metre"], metre.clone());
        self.define(&["g"], &["gram"], Unit::dimensionless(1e-3).multiply(&kilogram));
        self.define(&["s"], &["second", "sec"], second.clone());
        self.define(&["A"], &["ampere", "amp"], ampere.clone());
        self.define(&["K"], &["kelvin"], kelvin.clone());
        self.define(&["mol"], &["mole"], base(BaseDimension::Amount));
        self.define(&["cd"], &["candela"], base(BaseDimension::Luminosity));
        self.define(&["rad"], &["radian"], Unit::dimensionless(1.0));
        self.define(&["sr"], &["steradian"], Unit::dimensionless(1.0));

        let per_second = second.powi(-1);
        let newton = kilogram.multiply(&metre).multiply(&second.powi(-2));
        let pascal = newton.multiply(&metre.powi(-2));
        let joule = newton.multiply(&metre);
        let watt = joule.multiply(&per_second);
        let coulomb = ampere.multiply(&second);
        let volt = watt.multiply(&ampere.powi(-1));
        let ohm = volt.multiply(&ampere.powi(-1));
        let weber = volt.multiply(&second);

        self.define(&["Hz"], &["hertz"], per_second.clone());
        self.define(&["N"], &["newton"], newton.clone());
        self.define(&["Pa"], &["pascal"], pascal.clone());
        self.define(&["J"], &["joule"], joule.clone());
        self.define(&["W"], &["watt"], watt);
        self.define(&["C"], &["coulomb"], coulomb.clone());
        self.define(&["V"], &["volt"], volt.clone());
        self.define(&["F"], &["farad"], coulomb.multiply(&volt.powi(-1)));
        self.define(&["ohm", "Ω"], &["ohm"], ohm.clone());
        self.define(&["S"], &["siemens"], ohm.powi(-1));
        self.define(&["Wb"], &["weber"], weber.clone());
        self.define(&["T"], &["tesla"], weber.multiply(&metre.powi(-2)));
        self.define(&["H"], &["henry"], weber.multiply(&ampere.powi(-1)));
        self.define(&["lm"], &["lumen"], base(BaseDimension::Luminosity));
        self.define(
            &["lx"],
            &["lux"],
            base(BaseDimension::Luminosity).multiply(&metre.powi(-2)),
        );
        self.define(&["Bq"], &["becquerel"], per_second);
        self.define(&["Gy"], &["gray"], joule.multiply(&kilogram.powi(-1)));
        self.define(&["Sv"], &["sievert"], joule.multiply(&kilogram.powi(-1)));
        self.define(
            &["kat"],
            &["katal"],
            base(BaseDimension::Amount).multiply(&second.powi(-1)),
        );

        self.define(
            &["degC", "deg_C", "°C"],
            &[
                "celsius",
                "degree_celsius",
                "degrees_celsius",
                "degree_C",
                "degrees_C",
                "degreeC",
                "degreesC",
            ],
            kelvin.clone().with_offset(273.15),
        );
        self.define(
            &["degF", "deg_F", "°F"],
            &[
                "fahrenheit",
                "degree_fahrenheit",
                "degrees_fahrenheit",
                "degree_F",
                "degrees_F",
                "degreeF",
                "degreesF",
            ],
            Unit::dimensionless(5.0 / 9.0)
                .multiply(&kelvin)
                .with_offset(459.67 * 5.0 / 9.0),
        );
        self.define(
            &["degK", "deg_K"],
            &["degree_kelvin", "degrees_kelvin", "degree_K", "degrees_K"],
            kelvin,
        );
    }

    fn define_common(&mut self) {
        let metre = base(BaseDimension::Length);
        let second = base(BaseDimension::Time);
        let kilogram = base(BaseDimension::Mass);
        let pascal = kilogram
            .multiply(&metre.powi(-1))
            .multiply(&second.powi(-2));
        let joule = kilogram
            .multiply(&metre.powi(2))
            .multiply(&second.powi(-2));

        let scaled = |factor: f64, unit: &Unit| Unit::dimensionless(factor).multiply(unit);

        // Time
        self.define(&["min"], &["minute"], scaled(60.0, &second));
        self.define(&["h", "hr"], &["hour"], scaled(3_600.0, &second));
        self.define(&["d"], &["day"], scaled(86_400.0, &second));
        self.define(&[], &["week"], scaled(7.0 * 86_400.0, &second));
        self.define(&["yr"], &["year"], scaled(SECONDS_PER_YEAR, &second));
        self.define(&[], &["month"], scaled(SECONDS_PER_YEAR / 12.0, &second));
        self.define(&[], &["common_year"], scaled(365.0 * 86_400.0, &second));

        // Angles
        let degree = Unit::dimensionless(PI / 180.0);
        self.define(&["deg", "°"], &["degree", "arc_degree"], degree.clone());
        self.define(&[], &["arcminute", "arc_minute"], scaled(1.0 / 60.0, &degree));
        self.define(&[], &["arcsecond", "arc_second"], scaled(1.0 / 3_600.0, &degree));
        self.define(
            &[],
            &[
                "degrees_north",
                "degree_north",
                "degrees_N",
                "degree_N",
                "degreesN",
                "degreeN",
            ],
            degree.clone(),
        );
        self.define(
            &[],
            &[
                "degrees_east",
                "degree_east",
                "degrees_E",
                "degree_E",
                "degreesE",
                "degreeE",
            ],
            degree.clone(),
        );
        self.define(
            &[],
            &["degrees_true", "degree_true", "degrees_T", "degree_T"],
            degree,
        );

        // Dimensionless ratios
        self.define(&["%"], &["percent"], Unit::dimensionless(0.01));
        self.define(&["ppm"], &[], Unit::dimensionless(1e-6));

        // Length, area, volume
        self.define(&["ft"], &["foot", "feet"], scaled(0.3048, &metre));
        self.define(&["in"], &["inch"], scaled(0.0254, &metre));
        self.define(&["yd"], &["yard"], scaled(0.9144, &metre));
        self.define(&["mi"], &["mile"], scaled(1_609.344, &metre));
        self.define(&["nmi"], &["nautical_mile"], scaled(1_852.0, &metre));
        self.define(&["ha"], &["hectare"], scaled(1e4, &metre.powi(2)));
        self.define(&["L", "l"], &["liter", "litre"], scaled(1e-3, &metre.powi(3)));

        // Mass
        self.define(
            &["t"],
            &["tonne", "metric_ton"],
            scaled(1e3, &kilogram),
        );

        // Velocity
        self.define(
            &["kt", "kts"],
            &["knot"],
            scaled(1_852.0 / 3_600.0, &metre.multiply(&second.powi(-1))),
        );

        // Pressure
        self.define(&["bar"], &["bar"], scaled(1e5, &pascal));
        self.define(&["atm"], &["atmosphere"], scaled(101_325.0, &pascal));
        self.define(&["mmHg"], &[], scaled(133.322_387_415, &pascal));
        self.define(&["Torr"], &["torr"], scaled(101_325.0 / 760.0, &pascal));

        // Energy
        self.define(&["cal"], &["calorie"], scaled(4.1868, &joule));
        self.define(&["erg"], &["erg"], scaled(1e-7, &joule));
    }
}

fn base(dimension: BaseDimension) -> Unit {
    Unit::new(1.0, Dimensions::of(dimension))
}

fn prefixed(unit: &Unit, factor: f64) -> Unit {
    let mut scaled = unit.clone();
    scaled.scale *= factor;
    scaled
}

impl UnitSystem for UnitRegistry {
    type Unit = Unit;

    fn parse(&self, expr: &str) -> Result<Unit, UnitError> {
        parser::parse(self, expr)
    }

    fn is_time(&self, unit: &Unit) -> bool {
        unit.is_time()
    }

    fn convertible(&self, from: &Unit, to: &Unit) -> bool {
        from.is_convertible_to(to)
    }

    fn multiply(&self, a: &Unit, b: &Unit) -> Unit {
        a.multiply(b)
    }

    fn has_calendar_reference(&self, unit: &Unit) -> bool {
        unit.is_time() && unit.origin().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_symbols_resolve() {
        let registry = UnitRegistry::new();
        let hpa = registry.lookup("hPa");
        assert_eq!(hpa.map(|u| u.scale()), Some(100.0));
        let km = registry.lookup("km");
        assert_eq!(km.map(|u| u.scale()), Some(1_000.0));
    }

    #[test]
    fn plural_names_resolve() {
        let registry = UnitRegistry::new();
        assert!(registry.lookup("meters").is_some());
        assert!(registry.lookup("Days").is_some());
        assert!(registry.lookup("inches").is_some());
        assert!(registry.lookup("millibars").is_some());
    }

    #[test]
    fn unknown_identifier_is_absent() {
        let registry = UnitRegistry::new();
        assert!(registry.lookup("level").is_none());
        assert!(registry.lookup("sigma_level").is_none());
    }
}
