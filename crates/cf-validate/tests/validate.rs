//! Behaviour tests for the validation engine.

use cf_model::{AttrValue, Category, Dataset, ElementType, Severity, Variable};
use cf_standards::CanonicalNameTable;
use cf_units::UnitRegistry;
use cf_validate::{ValidationContext, ValidationReport, classify, validate};

fn names() -> CanonicalNameTable {
    CanonicalNameTable::new()
        .with_version("12")
        .with_entry("air_temperature", "K")
        .with_entry("time", "s")
        .with_entry("latitude", "degrees_north")
        .with_entry("longitude", "degrees_east")
        .with_entry("surface_air_pressure", "Pa")
        .with_entry("atmosphere_sigma_coordinate", "1")
        .with_entry("region", "")
}

fn time() -> Variable {
    Variable::new("time", ElementType::Double)
        .with_dimensions(["time"])
        .with_attribute("standard_name", "time")
        .with_attribute("units", "days since 2000-01-01")
        .with_values(vec![0.0, 1.0, 2.0])
}

fn lat() -> Variable {
    Variable::new("lat", ElementType::Float)
        .with_dimensions(["lat"])
        .with_attribute("standard_name", "latitude")
        .with_attribute("units", "degrees_north")
        .with_values(vec![-45.0, 45.0])
}

fn lon() -> Variable {
    Variable::new("lon", ElementType::Float)
        .with_dimensions(["lon"])
        .with_attribute("standard_name", "longitude")
        .with_attribute("units", "degrees_east")
        .with_values(vec![0.0, 180.0])
}

fn ta() -> Variable {
    Variable::new("ta", ElementType::Float)
        .with_dimensions(["time", "lat", "lon"])
        .with_attribute("standard_name", "air_temperature")
        .with_attribute("units", "K")
}

fn dataset<I>(variables: I) -> Dataset
where
    I: IntoIterator<Item = Variable>,
{
    let mut dataset = Dataset::new()
        .with_name("fixture.nc")
        .with_dimension("time", 3)
        .with_dimension("lat", 2)
        .with_dimension("lon", 2)
        .with_dimension("nv", 2)
        .with_global_attribute("Conventions", "CF-1.0");
    for variable in variables {
        dataset = dataset.with_variable(variable);
    }
    dataset
}

fn with_ta(ta: Variable) -> Dataset {
    dataset([time(), lat(), lon(), ta])
}

fn check(dataset: &Dataset) -> ValidationReport {
    let units = UnitRegistry::new();
    let names = names();
    let context = ValidationContext::new(&units, &names);
    validate(dataset, &context)
}

fn messages(report: &ValidationReport) -> Vec<String> {
    report
        .diagnostics
        .messages()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn clean_dataset_has_no_diagnostics() {
    let report = check(&with_ta(ta()));
    assert!(report.diagnostics.is_empty(), "{:?}", messages(&report));
    assert!(report.passed());
    assert_eq!(report.variables, vec!["time", "lat", "lon", "ta"]);
    assert_eq!(report.table_version.as_deref(), Some("12"));
}

#[test]
fn conventions_attribute() {
    let mut missing = with_ta(ta());
    missing.attributes.remove("Conventions");
    let report = check(&missing);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.error_count(), 0);
    assert_eq!(
        messages(&report),
        vec!["WARNING: No 'Conventions' attribute present"]
    );

    let unsupported = with_ta(ta()).with_global_attribute("Conventions", "COARDS");
    let report = check(&unsupported);
    assert_eq!(report.error_count(), 1);
    assert!(report.diagnostics.messages()[0].variable.is_none());

    let units = UnitRegistry::new();
    let names = names();
    let context = ValidationContext::new(&units, &names).with_conventions(["CF-1.0", "COARDS"]);
    assert!(validate(&unsupported, &context).passed());
}

#[test]
fn global_attribute_kinds_are_checked() {
    let dataset = with_ta(ta()).with_global_attribute("title", AttrValue::int(3));
    let report = check(&dataset);
    assert_eq!(
        messages(&report),
        vec!["ERROR: Attribute title of incorrect type (expected string)"]
    );
}

#[test]
fn coordinate_variables_are_only_coordinates() {
    let dataset = with_ta(
        ta().with_attribute("coordinates", "lat height")
            .with_attribute("grid_mapping", "lon"),
    )
    .with_variable(
        Variable::new("height", ElementType::Float)
            .with_attribute("units", "m")
            .with_attribute("long_name", "height above ground"),
    );
    let classification = classify(&dataset);
    let roles = classification.roles;
    for name in ["time", "lat", "lon"] {
        assert!(roles.is_coordinate(name));
        assert!(!roles.is_auxiliary(name));
        assert!(!roles.is_boundary(name));
        assert!(!roles.is_climatology(name));
        assert!(!roles.is_grid_mapping(name));
    }
    assert!(!roles.is_coordinate("ta"));
    assert!(roles.is_auxiliary("height"));
    assert!(classification.issues.is_empty());
}

#[test]
fn multidimensional_variable_named_after_dimension() {
    let dataset = dataset([
        time(),
        lat(),
        Variable::new("lon", ElementType::Float)
            .with_dimensions(["lat", "lon"])
            .with_attribute("standard_name", "longitude")
            .with_attribute("units", "degrees_east"),
    ]);
    assert!(!classify(&dataset).roles.is_coordinate("lon"));
    let report = check(&dataset);
    assert!(messages(&report).contains(
        &"WARNING: The name of a multi-dimensional coordinate variable should not match the name of any of its dimensions".to_string()
    ));
}

#[test]
fn coordinates_attribute_references() {
    let dataset = with_ta(ta().with_attribute("coordinates", "station_name missing"))
        .with_dimension("station", 4)
        .with_dimension("strlen", 8)
        .with_variable(
            Variable::new("station_name", ElementType::Char)
                .with_dimensions(["station", "strlen"])
                .with_attribute("long_name", "station name"),
        );
    let report = check(&dataset);
    let ta_messages: Vec<String> = report
        .diagnostics
        .for_variable("ta")
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        ta_messages,
        vec![
            "ERROR: Leading dimension of label variable station_name must match one of those for ta",
            "ERROR: coordinates attribute referencing non-existent variable: missing",
        ]
    );
}

#[test]
fn auxiliary_dimensions_must_be_a_subset() {
    let dataset = with_ta(
        Variable::new("ta", ElementType::Float)
            .with_dimensions(["lat", "lon"])
            .with_attribute("standard_name", "air_temperature")
            .with_attribute("units", "K")
            .with_attribute("coordinates", "surface_time"),
    )
    .with_variable(
        Variable::new("surface_time", ElementType::Double)
            .with_dimensions(["time", "lat"])
            .with_attribute("long_name", "time of observation")
            .with_attribute("units", "days since 2000-01-01"),
    );
    let report = check(&dataset);
    assert_eq!(
        report
            .diagnostics
            .count_in(Category::Reference, Severity::Error),
        1
    );
}

fn auxiliary(name: &str, dimensions: [&str; 2]) -> Variable {
    Variable::new(name, ElementType::Float)
        .with_dimensions(dimensions)
        .with_attribute("long_name", "auxiliary field")
        .with_attribute("units", "1")
}

#[test]
fn every_auxiliary_outside_the_dimensions_is_reported() {
    let dataset = with_ta(
        Variable::new("ta", ElementType::Float)
            .with_dimensions(["lat", "lon"])
            .with_attribute("standard_name", "air_temperature")
            .with_attribute("units", "K")
            .with_attribute("coordinates", "aux_a aux_b"),
    )
    .with_variable(auxiliary("aux_a", ["time", "lat"]))
    .with_variable(auxiliary("aux_b", ["time", "lon"]));
    assert_eq!(
        messages(&check(&dataset)),
        vec![
            "ERROR: Dimensions of aux_a must be a subset of dimensions of ta",
            "ERROR: Dimensions of aux_b must be a subset of dimensions of ta",
        ]
    );
}

#[test]
fn label_variables_need_two_dimensions() {
    let dataset = with_ta(ta().with_attribute("coordinates", "station_name")).with_variable(
        Variable::new("station_name", ElementType::Char)
            .with_dimensions(["lat"])
            .with_attribute("long_name", "station name"),
    );
    let report = check(&dataset);
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        messages(&report),
        vec!["ERROR: Label variable station_name must have 2 dimensions only (has 1)"]
    );
}

#[test]
fn monotonic_coordinates() {
    let cases: [(&[f64], usize); 4] = [
        (&[1.0, 2.0, 3.0, 4.0], 0),
        (&[4.0, 3.0, 2.0, 1.0], 0),
        (&[1.0, 2.0, 2.0, 3.0], 1),
        (&[1.0, 3.0, 2.0], 1),
    ];
    for (values, expected) in cases {
        let dataset = dataset([time(), lat().with_values(values.to_vec()), lon()]);
        let report = check(&dataset);
        assert_eq!(
            report
                .diagnostics
                .count_in(Category::Coordinate, Severity::Error),
            expected,
            "{values:?}"
        );
        assert_eq!(report.error_count(), expected);
    }
}

#[test]
fn units_must_match_the_canonical_unit() {
    let report = check(&with_ta(ta().with_attribute("units", "Celsius")));
    assert_eq!(report.error_count(), 0);

    let report = check(&with_ta(ta().with_attribute("units", "meters")));
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        report.diagnostics.count_in(Category::Units, Severity::Error),
        1
    );
}

#[test]
fn variance_squares_the_canonical_unit() {
    let variance = ta().with_attribute("cell_methods", "time: variance");
    assert!(check(&with_ta(variance.clone().with_attribute("units", "K2"))).passed());
    assert_eq!(check(&with_ta(variance)).error_count(), 1);

    let commented = ta().with_attribute("cell_methods", "time: mean (variance)");
    assert!(check(&with_ta(commented)).passed());
}

#[test]
fn invalid_and_deprecated_units() {
    let report = check(&with_ta(ta().with_attribute("units", "furlongs_per_bogus")));
    assert_eq!(
        messages(&report),
        vec!["ERROR: Invalid units: furlongs_per_bogus"]
    );

    let report = check(&with_ta(ta().with_attribute("units", "level")));
    assert_eq!(messages(&report), vec!["WARNING: units level is deprecated"]);

    let report = check(&with_ta(ta().with_attribute("units", AttrValue::int(1))));
    assert!(messages(&report).contains(&"ERROR: units attribute must be of type 'String'".to_string()));
}

#[test]
fn oversized_unit_exponents_are_invalid_units() {
    let report = check(&with_ta(ta().with_attribute("units", "m2000000000 m2000000000")));
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        messages(&report),
        vec!["ERROR: Invalid units: m2000000000 m2000000000"]
    );
}

#[test]
fn extra_units_are_accepted_without_parsing() {
    let dataset = with_ta(ta().with_attribute("units", "furlongs_per_bogus"));
    let units = UnitRegistry::new();
    let names = names();
    let context = ValidationContext::new(&units, &names)
        .with_extra_units(["furlongs_per_bogus".to_string()].into_iter().collect());
    assert!(validate(&dataset, &context).passed());
}

#[test]
fn coordinates_without_units_warn() {
    let dataset = dataset([
        time(),
        Variable::new("lat", ElementType::Float)
            .with_dimensions(["lat"])
            .with_attribute("long_name", "latitude index")
            .with_values(vec![0.0, 1.0]),
        lon(),
    ]);
    let report = check(&dataset);
    assert_eq!(
        messages(&report),
        vec!["WARNING: units attribute should be present"]
    );

    let no_units_data = with_ta(
        Variable::new("ta", ElementType::Float)
            .with_dimensions(["time", "lat", "lon"])
            .with_attribute("long_name", "a ratio"),
    );
    assert!(check(&no_units_data).diagnostics.is_empty());
}

#[test]
fn cell_methods_syntax() {
    let report = check(&with_ta(ta().with_attribute("cell_methods", "time: mean")));
    assert_eq!(report.error_count(), 0);

    let report = check(&with_ta(ta().with_attribute("cell_methods", "time mean")));
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        messages(&report),
        vec!["ERROR: Invalid cell_methods syntax: 'time mean'"]
    );
}

#[test]
fn cell_methods_names() {
    let report = check(&with_ta(
        ta().with_attribute("cell_methods", "height: mean lat: maximum lat: minimum"),
    ));
    assert_eq!(
        messages(&report),
        vec![
            "ERROR: Invalid 'name' in cell_methods attribute: height",
            "WARNING: Multiple cell_methods entries for dimension: lat",
        ]
    );

    let report = check(&with_ta(
        ta().with_attribute("cell_methods", "time: mean time: maximum"),
    ));
    assert!(report.diagnostics.is_empty());
}

#[test]
fn cell_methods_interval_comments() {
    let report = check(&with_ta(
        ta().with_attribute("cell_methods", "time: mean (interval: 1 hour)"),
    ));
    assert!(report.diagnostics.is_empty());

    let report = check(&with_ta(
        ta().with_attribute("cell_methods", "time: mean (interval: 1 fortnights_x)"),
    ));
    assert_eq!(
        messages(&report),
        vec!["ERROR: Invalid cell_methods syntax: '(interval: 1 fortnights_x)'"]
    );
}

fn cell_area(units: &str) -> Variable {
    Variable::new("cellarea", ElementType::Float)
        .with_dimensions(["lat", "lon"])
        .with_attribute("long_name", "area of grid cell")
        .with_attribute("units", units)
}

#[test]
fn cell_measures_units_are_exact() {
    let measured = ta().with_attribute("cell_measures", "area: cellarea");
    let report = check(&with_ta(measured.clone()).with_variable(cell_area("m2")));
    assert_eq!(report.error_count(), 0, "{:?}", messages(&report));

    let report = check(&with_ta(measured).with_variable(cell_area("m")));
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        messages(&report),
        vec!["ERROR: Must have units of m2 for area measure"]
    );
}

#[test]
fn cell_measures_trailing_token_is_dropped() {
    let measured = ta().with_attribute("cell_measures", "area: cellarea volume:");
    let report = check(&with_ta(measured).with_variable(cell_area("m2")));
    assert!(report.passed(), "{:?}", messages(&report));
}

#[test]
fn cell_measures_references() {
    let measured = ta().with_attribute("cell_measures", "area: nothing span: cellarea");
    let report = check(&with_ta(measured).with_variable(cell_area("m2")));
    assert_eq!(
        messages(&report),
        vec![
            "ERROR: cell_measures referring to variable that doesn't exist: nothing",
            "ERROR: Invalid measure in attribute cell_measures: span",
        ]
    );
}

#[test]
fn every_measure_outside_the_dimensions_is_reported() {
    let measured = Variable::new("ta", ElementType::Float)
        .with_dimensions(["lat", "lon"])
        .with_attribute("standard_name", "air_temperature")
        .with_attribute("units", "K")
        .with_attribute("cell_measures", "area: cella volume: cellv");
    let dataset = with_ta(measured)
        .with_variable(auxiliary("cella", ["time", "lat"]).with_attribute("units", "m2"))
        .with_variable(auxiliary("cellv", ["time", "lon"]).with_attribute("units", "m3"));
    assert_eq!(
        messages(&check(&dataset)),
        vec![
            "ERROR: Dimensions of cella must be same or a subset of [lat, lon]",
            "ERROR: Dimensions of cellv must be same or a subset of [lat, lon]",
        ]
    );
}

#[test]
fn valid_range_excludes_valid_min() {
    let ranged = ta().with_attribute(
        "valid_range",
        AttrValue::sequence(ElementType::Float, vec![0.0, 10.0]),
    );
    assert_eq!(check(&with_ta(ranged.clone())).error_count(), 0);
    let report = check(&with_ta(ranged.with_attribute("valid_min", AttrValue::float(0.0))));
    assert_eq!(report.error_count(), 1);
}

#[test]
fn fill_value_type_must_match() {
    let ta = Variable::new("ta", ElementType::Int)
        .with_dimensions(["time", "lat", "lon"])
        .with_attribute("standard_name", "air_temperature")
        .with_attribute("units", "K")
        .with_attribute("_FillValue", AttrValue::float(-999.0));
    let report = check(&with_ta(ta));
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        messages(&report),
        vec!["ERROR: _FillValue of different type to variable (int)"]
    );
}

#[test]
fn fill_and_missing_values() {
    let ta = ta()
        .with_attribute(
            "valid_range",
            AttrValue::sequence(ElementType::Float, vec![0.0, 400.0]),
        )
        .with_attribute("_FillValue", AttrValue::float(100.0))
        .with_attribute("missing_value", AttrValue::float(-1.0));
    let report = check(&with_ta(ta));
    assert_eq!(
        messages(&report),
        vec![
            "WARNING: _FillValue should be outside valid_range",
            "WARNING: missing_value and _FillValue set to differing values",
        ]
    );

    let deprecated = ta_with_missing_only();
    assert_eq!(
        messages(&check(&with_ta(deprecated))),
        vec!["WARNING: Use of 'missing_value' attribute is deprecated"]
    );
}

fn ta_with_missing_only() -> Variable {
    ta().with_attribute("missing_value", AttrValue::float(1e20))
}

fn time_bounds(dimensions: &[&str], values: Vec<f64>) -> Variable {
    Variable::new("time_bnds", ElementType::Double)
        .with_dimensions(dimensions.iter().copied())
        .with_values(values)
}

#[test]
fn bounds_dimension_count_suppresses_containment() {
    let dataset = dataset([
        time().with_attribute("bounds", "time_bnds"),
        lat(),
        lon(),
        time_bounds(&["time"], vec![10.0, 11.0, 12.0]),
    ]);
    let report = check(&dataset);
    assert_eq!(
        messages(&report),
        vec!["ERROR: Incorrect number of dimensions for boundary variable: time_bnds"]
    );
    assert!(classify(&dataset).roles.is_boundary("time_bnds"));
}

#[test]
fn values_must_lie_within_bounds() {
    let inside = dataset([
        time().with_attribute("bounds", "time_bnds"),
        lat(),
        lon(),
        time_bounds(&["time", "nv"], vec![-0.5, 0.5, 1.5, 0.5, 1.5, 2.5]),
    ]);
    assert!(check(&inside).diagnostics.is_empty());

    let outside = dataset([
        time().with_attribute("bounds", "time_bnds"),
        lat(),
        lon(),
        time_bounds(&["time", "nv"], vec![-0.5, 0.5, 0.5, 0.7, 1.5, 2.5]),
    ]);
    let report = check(&outside);
    assert_eq!(
        messages(&report),
        vec!["WARNING: Data for variable time lies outside cell boundaries"]
    );
}

#[test]
fn bounds_properties_must_agree() {
    let dataset = dataset([
        time().with_attribute("bounds", "time_bnds"),
        lat(),
        lon(),
        time_bounds(&["time", "nv"], vec![-0.5, 0.5, 0.5, 1.5, 1.5, 2.5])
            .with_attribute("units", "hours since 2000-01-01"),
    ]);
    let report = check(&dataset);
    assert_eq!(
        messages(&report),
        vec!["ERROR: Boundary var time_bnds has inconsistent units to time"]
    );
}

#[test]
fn bounds_must_be_numeric() {
    let with_bounds = |element_type| {
        dataset([
            time().with_attribute("bounds", "time_bnds"),
            lat(),
            lon(),
            Variable::new("time_bnds", element_type).with_dimensions(["time", "nv"]),
        ])
    };
    let report = check(&with_bounds(ElementType::Char));
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        messages(&report),
        vec!["ERROR: Boundary variable time_bnds has non-numeric data type"]
    );
    assert!(check(&with_bounds(ElementType::Short)).passed());
}

#[test]
fn bounds_must_name_a_single_variable() {
    let dataset = dataset([
        time().with_attribute("bounds", "time_bnds extra"),
        lat(),
        lon(),
    ]);
    let report = check(&dataset);
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        messages(&report),
        vec!["ERROR: Invalid syntax for 'bounds' attribute"]
    );
}

#[test]
fn grid_mapping_must_name_a_single_variable() {
    let report = check(&with_ta(ta().with_attribute("grid_mapping", "crs crs2")));
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        messages(&report),
        vec!["ERROR: ta - Invalid syntax for 'grid_mapping' attribute"]
    );
}

#[test]
fn climatology_variables_must_not_have_fill_values() {
    let dataset = dataset([
        time()
            .with_attribute("climatology", "climatology_bounds")
            .with_attribute("calendar", "standard"),
        lat(),
        lon(),
        Variable::new("climatology_bounds", ElementType::Double)
            .with_dimensions(["time", "nv"])
            .with_attribute("_FillValue", AttrValue::double(-1.0))
            .with_values(vec![-0.5, 0.5, 0.5, 1.5, 1.5, 2.5]),
    ]);
    let report = check(&dataset);
    assert_eq!(
        messages(&report),
        vec!["ERROR: Climatology variable must not have _FillValue attribute"]
    );
}

#[test]
fn climatology_variables_must_not_have_missing_values() {
    let dataset = dataset([
        time()
            .with_attribute("climatology", "climatology_bounds")
            .with_attribute("calendar", "standard"),
        lat(),
        lon(),
        Variable::new("climatology_bounds", ElementType::Double)
            .with_dimensions(["time", "nv"])
            .with_attribute("missing_value", AttrValue::double(-1.0))
            .with_values(vec![-0.5, 0.5, 0.5, 1.5, 1.5, 2.5]),
    ]);
    let report = check(&dataset);
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        messages(&report),
        vec![
            "WARNING: Use of 'missing_value' attribute is deprecated",
            "ERROR: Climatology variable must not have missing_value attribute",
        ]
    );
}

#[test]
fn dimension_order_warns_once() {
    let ta = ta().with_dimensions(["lon", "lat", "time"]);
    let report = check(&with_ta(ta));
    assert_eq!(report.error_count(), 0);
    assert_eq!(
        messages(&report),
        vec!["WARNING: space/time dimensions appear in incorrect order"]
    );
}

#[test]
fn repeated_dimensions() {
    let ta = ta().with_dimensions(["lat", "lat"]);
    let report = check(&with_ta(ta));
    assert_eq!(
        messages(&report),
        vec![
            "ERROR: Variable has more than 1 coordinate variable with axis Y",
            "ERROR: variable has repeated dimensions",
        ]
    );
}

#[test]
fn axis_must_agree_with_units() {
    let dataset = dataset([time(), lat().with_attribute("axis", "X"), lon()]);
    let report = check(&dataset);
    assert!(messages(&report).contains(
        &"ERROR: axis attribute X inconsistent with coordinate type Y as deduced from units and/or positive"
            .to_string()
    ));

    let dataset = dataset_with_lat_axis("y");
    assert!(check(&dataset).diagnostics.is_empty());

    let dataset = dataset_with_lat_axis("W");
    assert_eq!(
        messages(&check(&dataset)),
        vec!["ERROR: Invalid value for axis attribute: W"]
    );
}

fn dataset_with_lat_axis(axis: &str) -> Dataset {
    dataset([time(), lat().with_attribute("axis", axis), lon()])
}

#[test]
fn positive_must_be_up_or_down() {
    let dataset = dataset([time(), lat(), lon().with_attribute("positive", "sideways")]);
    let report = check(&dataset);
    assert!(messages(&report).contains(&"ERROR: Invalid value for positive attribute: sideways".to_string()));
}

#[test]
fn standard_names() {
    let report = check(&with_ta(ta().with_attribute("standard_name", "air_temprature")));
    assert_eq!(
        messages(&report),
        vec!["ERROR: Invalid standard_name: air_temprature"]
    );

    let derived = ta().with_attribute("standard_name", "rate_of_change_of_air_temperature");
    assert!(check(&with_ta(derived)).passed());

    let spaced = ta().with_attribute("standard_name", "air temperature");
    assert_eq!(
        messages(&check(&with_ta(spaced))),
        vec!["ERROR: Whitespace not allowed in standard_name: 'air temperature'"]
    );
}

#[test]
fn missing_description_warns() {
    let bare = Variable::new("ta", ElementType::Float)
        .with_dimensions(["time", "lat", "lon"])
        .with_attribute("units", "K");
    let report = check(&with_ta(bare));
    assert_eq!(
        messages(&report),
        vec!["WARNING: No standard_name or long_name attributes"]
    );
}

#[test]
fn time_attributes_belong_on_time_coordinates() {
    let report = check(&with_ta(ta().with_attribute("calendar", "standard")));
    assert_eq!(
        messages(&report),
        vec!["ERROR: Attribute calendar may only be attached to time coordinate variable"]
    );
}

#[test]
fn calendars() {
    let martian = dataset([time().with_attribute("calendar", "martian"), lat(), lon()]);
    assert_eq!(
        messages(&check(&martian)),
        vec!["ERROR: Non-standard calendar 'martian', so month_lengths attribute must be present"]
    );

    let conflicting = dataset([
        time()
            .with_attribute("calendar", "NoLeap")
            .with_attribute("leap_year", AttrValue::int(2000)),
        lat(),
        lon(),
    ]);
    let report = check(&conflicting);
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        report.diagnostics.count_in(Category::Time, Severity::Error),
        1
    );

    let custom = dataset([
        time()
            .with_attribute("calendar", "martian")
            .with_attribute(
                "month_lengths",
                AttrValue::sequence(ElementType::Int, vec![30.0; 11]),
            )
            .with_attribute("leap_month", AttrValue::int(13)),
        lat(),
        lon(),
    ]);
    assert_eq!(
        messages(&check(&custom)),
        vec![
            "ERROR: Attribute 'month_lengths' should be an integer array of size 12",
            "ERROR: leap_month should be between 1 and 12",
            "WARNING: leap_month is ignored as leap_year NOT specified",
        ]
    );
}

#[test]
fn time_units_need_a_reference() {
    let dataset = dataset([time().with_attribute("units", "days"), lat(), lon()]);
    assert_eq!(
        messages(&check(&dataset)),
        vec!["ERROR: Invalid units and/or reference time: days"]
    );
}

fn sigma_dataset(formula_terms: &str) -> Dataset {
    dataset([
        time(),
        lat(),
        lon(),
        Variable::new("lev", ElementType::Double)
            .with_dimensions(["lev"])
            .with_attribute("standard_name", "atmosphere_sigma_coordinate")
            .with_attribute("positive", "down")
            .with_attribute("formula_terms", formula_terms)
            .with_values(vec![0.1, 0.5, 0.9]),
        Variable::new("PS", ElementType::Float)
            .with_dimensions(["time", "lat", "lon"])
            .with_attribute("standard_name", "surface_air_pressure")
            .with_attribute("units", "Pa"),
        Variable::new("PTOP", ElementType::Float)
            .with_attribute("long_name", "pressure at model top")
            .with_attribute("units", "Pa"),
    ])
    .with_dimension("lev", 3)
}

#[test]
fn formula_terms() {
    let report = check(&sigma_dataset("sigma: lev ps: PS ptop: PTOP"));
    assert!(report.diagnostics.is_empty(), "{:?}", messages(&report));

    let report = check(&sigma_dataset("sigma: lev ps: PS orog: PTOP ptop: PTOPX"));
    assert_eq!(
        messages(&report),
        vec![
            "ERROR: term orog not present in formula",
            "ERROR: PTOPX is not declared as a variable",
        ]
    );

    let report = check(&sigma_dataset("sigma:lev"));
    assert_eq!(messages(&report), vec!["ERROR: Invalid formula_terms syntax"]);
}

#[test]
fn formula_terms_tokens_are_classified_one_by_one() {
    let report = check(&sigma_dataset("sigma: ps: PS"));
    assert!(report.diagnostics.is_empty(), "{:?}", messages(&report));

    let report = check(&sigma_dataset("sigma: lev: PS"));
    assert_eq!(
        messages(&report),
        vec!["ERROR: term lev not present in formula"]
    );
}

#[test]
fn formula_terms_need_a_known_standard_name() {
    let mut dataset = sigma_dataset("sigma: lev");
    if let Some(lev) = dataset.variables.iter_mut().find(|v| v.name == "lev") {
        lev.attributes.remove("standard_name");
        lev.attributes
            .insert("long_name".to_string(), AttrValue::text("sigma"));
    }
    assert_eq!(
        messages(&check(&dataset)),
        vec!["ERROR: Cannot get formula definition as no standard_name"]
    );
}

#[test]
fn grid_mapping_variables() {
    let crs = Variable::new("crs", ElementType::Int)
        .with_attribute("grid_mapping_name", "polar_stereographic");
    let mapped = ta().with_attribute("grid_mapping", "crs");
    assert!(check(&with_ta(mapped.clone()).with_variable(crs)).diagnostics.is_empty());

    let unnamed = Variable::new("crs", ElementType::Int).with_dimensions(["lat"]);
    assert_eq!(
        messages(&check(&with_ta(mapped).with_variable(unnamed))),
        vec![
            "ERROR: No grid_mapping_name attribute set",
            "WARNING: grid_mapping variable should have 0 dimensions",
        ]
    );

    let dangling = ta().with_attribute("grid_mapping", "nowhere");
    assert_eq!(
        messages(&check(&with_ta(dangling))),
        vec!["ERROR: grid_mapping attribute referencing non-existent variable nowhere"]
    );
}

#[test]
fn packed_data() {
    let packed = Variable::new("ta", ElementType::Int)
        .with_dimensions(["time", "lat", "lon"])
        .with_attribute("standard_name", "air_temperature")
        .with_attribute("units", "K")
        .with_attribute("scale_factor", AttrValue::float(0.01))
        .with_attribute("add_offset", AttrValue::float(273.15));
    assert_eq!(
        messages(&check(&with_ta(packed.clone()))),
        vec!["WARNING: packed variable should not be of type int when packing with float"]
    );

    let mismatched = packed.with_attribute("add_offset", AttrValue::double(273.15));
    assert_eq!(
        messages(&check(&with_ta(mismatched))),
        vec!["ERROR: scale_factor and add_offset must be the same numeric data type"]
    );
}

#[test]
fn compressed_index_variables() {
    let landpoint = |compress: &str, values: Vec<f64>| {
        Variable::new("landpoint", ElementType::Int)
            .with_dimensions(["landpoint"])
            .with_attribute("long_name", "land point index")
            .with_attribute("compress", compress)
            .with_values(values)
    };
    let base = |variable: Variable| {
        dataset([time(), lat(), lon(), variable]).with_dimension("landpoint", 3)
    };

    let report = check(&base(landpoint("lat lon", vec![0.0, 1.0, 3.0])));
    assert_eq!(
        report.diagnostics.count_in(Category::Compress, Severity::Error),
        0
    );

    let report = check(&base(landpoint("lat lon", vec![0.0, 1.0, 4.0])));
    assert!(messages(&report).contains(
        &"ERROR: compressed index values must be in the range 0 to 3".to_string()
    ));

    let report = check(&base(landpoint("lat depth", vec![0.0])));
    assert!(messages(&report).contains(
        &"ERROR: compress attribute naming nonexistent dimension: depth".to_string()
    ));
}

#[test]
fn variable_names() {
    let dataset = with_ta(ta()).with_variable(
        Variable::new("TA", ElementType::Float)
            .with_dimensions(["time", "lat", "lon"])
            .with_attribute("standard_name", "air_temperature")
            .with_attribute("units", "K"),
    );
    assert_eq!(
        messages(&check(&dataset)),
        vec!["WARNING: variable clash: TA differs from ta only in case"]
    );
}

#[test]
fn validation_is_idempotent() {
    let dataset = with_ta(
        ta().with_attribute("units", "meters")
            .with_attribute("cell_methods", "time mean")
            .with_dimensions(["lon", "lat", "time"]),
    );
    let first = check(&dataset);
    let second = check(&dataset);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert!(first.error_count() > 0);
    assert!(first.warning_count() > 0);
}
