use cf_units::{
    BaseDimension, MAX_EXPONENT, SECONDS_PER_YEAR, UnitError, UnitRegistry, UnitSystem,
};
use proptest::prelude::*;

fn registry() -> UnitRegistry {
    UnitRegistry::new()
}

#[test]
fn celsius_is_convertible_to_kelvin() {
    let units = registry();
    assert!(units.strings_convertible("Celsius", "K"));
    assert!(units.strings_convertible("degC", "K"));
    assert!(!units.strings_convertible("meters", "K"));
}

#[test]
fn composite_expressions() {
    let units = registry();
    let flux = units.parse("kg m-2 s-1").unwrap();
    let alt = units.parse("kg/(m^2*s)").unwrap();
    let dotted = units.parse("kg.m**-2.s-1").unwrap();
    assert!(units.convertible(&flux, &alt));
    assert!(units.convertible(&flux, &dotted));
    assert_eq!(flux.dimensions().exponent(BaseDimension::Length), -2);
    assert_eq!(flux.dimensions().exponent(BaseDimension::Time), -1);
}

#[test]
fn pressure_units_share_dimensions() {
    let units = registry();
    for expr in ["hPa", "mbar", "millibars", "Pa", "bar", "atm", "N m-2"] {
        assert!(units.strings_convertible(expr, "Pa"), "{expr}");
    }
    let hpa = units.parse("hPa").unwrap();
    assert_eq!(hpa.scale(), 100.0);
}

#[test]
fn time_units_and_references() {
    let units = registry();
    let plain = units.parse("days").unwrap();
    assert!(units.is_time(&plain));
    assert!(!units.has_calendar_reference(&plain));

    let anchored = units.parse("days since 1990-01-01 00:00:00").unwrap();
    assert!(units.is_time(&anchored));
    assert!(units.has_calendar_reference(&anchored));
    assert_eq!(anchored.origin(), Some("1990-01-01 00:00:00"));

    let hours = units.parse("hours since 2000-1-1").unwrap();
    assert!(units.has_calendar_reference(&hours));

    let year = units.parse("year").unwrap();
    assert_eq!(year.scale(), SECONDS_PER_YEAR);
}

#[test]
fn invalid_reference_time() {
    let units = registry();
    assert!(matches!(
        units.parse("days since yesterday"),
        Err(UnitError::InvalidOrigin(_))
    ));
    assert!(matches!(
        units.parse("m since 1990-01-01"),
        Err(UnitError::InvalidOrigin(_))
    ));
}

#[test]
fn numeric_origin_shifts_unit() {
    let units = registry();
    let shifted = units.parse("K @ 273.15").unwrap();
    let celsius = units.parse("degC").unwrap();
    assert_eq!(shifted.offset(), celsius.offset());
}

#[test]
fn angles_are_dimensionless() {
    let units = registry();
    for expr in ["degrees_north", "degree_east", "degrees", "radian", "1"] {
        let unit = units.parse(expr).unwrap();
        assert!(unit.dimensions().is_dimensionless(), "{expr}");
    }
}

#[test]
fn rejects_unknown_and_malformed() {
    let units = registry();
    assert!(matches!(units.parse("level"), Err(UnitError::UnknownUnit(_))));
    assert!(matches!(units.parse("furlongs"), Err(UnitError::UnknownUnit(_))));
    assert!(matches!(units.parse(""), Err(UnitError::Empty)));
    assert!(matches!(units.parse("m^x"), Err(UnitError::Syntax { .. })));
    assert!(matches!(units.parse("(m"), Err(UnitError::Syntax { .. })));
    assert!(matches!(units.parse("m $"), Err(UnitError::Syntax { .. })));
}

#[test]
fn oversized_exponents_are_rejected() {
    let units = registry();
    assert!(matches!(
        units.parse("m2000000000 m2000000000"),
        Err(UnitError::ExponentRange(_))
    ));
    assert!(matches!(
        units.parse("m^3000000000"),
        Err(UnitError::Syntax { .. })
    ));
    assert!(matches!(
        units.parse("(m40000)2"),
        Err(UnitError::ExponentRange(_))
    ));
    let limit = format!("m{MAX_EXPONENT}");
    assert!(units.parse(&limit).is_ok());
    let squared = units.multiply(&units.parse(&limit).unwrap(), &units.parse(&limit).unwrap());
    assert_eq!(
        squared.dimensions().exponent(BaseDimension::Length),
        2 * MAX_EXPONENT
    );
}

#[test]
fn squared_canonical_unit() {
    let units = registry();
    let kelvin = units.parse("K").unwrap();
    let squared = units.multiply(&kelvin, &kelvin);
    assert!(units.convertible(&units.parse("K2").unwrap(), &squared));
    assert!(!units.convertible(&kelvin, &squared));
}

#[test]
fn percent_and_scaled_numbers() {
    let units = registry();
    let percent = units.parse("%").unwrap();
    assert_eq!(percent.scale(), 0.01);
    let scaled = units.parse("1e-3 kg kg-1").unwrap();
    assert!(scaled.dimensions().is_dimensionless());
    assert!((scaled.scale() - 1e-3).abs() < 1e-15);
}

proptest! {
    #[test]
    fn exponent_round_trips(power in -4i32..=4) {
        let units = registry();
        let expr = format!("m{power}");
        let unit = units.parse(&expr).unwrap();
        prop_assert_eq!(unit.dimensions().exponent(BaseDimension::Length), power);
    }
}
