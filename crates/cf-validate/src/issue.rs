//! Convention issue types.
//!
//! Each variant carries only the data its message needs. The variable the
//! issue was found on is attached when the issue becomes a [`Diagnostic`].

use cf_model::{Category, Diagnostic, ElementType, Severity, ValueKind};
use cf_standards::Attachment;
use serde::Serialize;

/// Attribute linking a variable to its cell boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsKind {
    Bounds,
    Climatology,
}

impl BoundsKind {
    pub fn attribute(&self) -> &'static str {
        match self {
            BoundsKind::Bounds => "bounds",
            BoundsKind::Climatology => "climatology",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BoundsKind::Bounds => "Boundary",
            BoundsKind::Climatology => "Climatology",
        }
    }
}

/// Convention issue, one variant per distinct message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Issue {
    // Global attributes
    /// No `Conventions` global attribute
    ConventionsMissing,
    /// `Conventions` names none of the accepted versions
    ConventionsUnsupported { value: String },

    // Cross references
    /// `coordinates` is not a blank-separated name list
    CoordinatesSyntax { variable: String },
    /// `coordinates` names a variable the dataset lacks
    CoordinatesMissingVariable { name: String },
    /// Character label variable without exactly two dimensions
    LabelDimensionCount { label: String, count: usize },
    /// Label's leading dimension is not one of the referencing variable's
    LabelLeadingDimension { label: String, variable: String },
    /// Auxiliary coordinate spans dimensions the data variable lacks
    AuxDimensionsNotSubset { aux: String, variable: String },
    /// `bounds`/`climatology` is not a single variable name
    BoundsSyntax { kind: BoundsKind },
    /// `bounds`/`climatology` names a variable the dataset lacks
    BoundsMissingVariable { kind: BoundsKind, name: String },
    /// Boundary variable of a non-numeric type
    BoundsNotNumeric { kind: BoundsKind, name: String },
    /// Boundary variable without one extra dimension
    BoundsDimensionCount { kind: BoundsKind, name: String },
    /// Boundary variable missing one of the parent's dimensions
    BoundsDimensions { kind: BoundsKind, name: String },
    /// Boundary variable disagrees with its parent on a shared attribute
    BoundsInconsistent {
        kind: BoundsKind,
        name: String,
        property: &'static str,
        variable: String,
    },
    /// Coordinate values fall outside their cell bounds
    OutsideCellBounds { variable: String },
    /// `grid_mapping` is not a single variable name
    GridMappingSyntax { variable: String },
    /// `grid_mapping` names a variable the dataset lacks
    GridMappingMissingVariable { name: String },

    // Naming
    /// Variable name is not a valid identifier
    InvalidVariableName { name: String },
    /// Variable name equals an earlier one ignoring case
    VariableClash { name: String, existing: String },
    /// Attribute name is not a valid identifier
    InvalidAttributeName { attribute: String },

    // Dimensions
    /// Two dimensions map onto the same axis
    DuplicateAxis { axis: char },
    /// Space/time dimensions out of T, Z, Y, X order
    DimensionOrder,
    /// A dimension appears twice
    RepeatedDimensions,
    /// Multi-dimensional coordinate named after one of its dimensions
    MultiDimCoordinate,

    // Description
    /// Neither `standard_name` nor `long_name`
    MissingDescription,
    /// `standard_name` contains whitespace
    StandardNameWhitespace { name: String },
    /// `standard_name` absent from the table and not derived
    InvalidStandardName { name: String },

    // Attribute schema
    /// Attribute value of the wrong kind
    AttributeType { attribute: String, expected: ValueKind },
    /// Attribute on a kind of variable it does not belong to
    AttributeAttachment { attribute: String, role: Attachment },
    /// Calendar attribute outside a time coordinate
    TimeAttributeMisplaced { attribute: String },

    // Units
    /// `units` is not text
    UnitsNotString,
    /// Unit string CF deprecates
    DeprecatedUnits { units: String },
    /// `month` or `year`
    CautionaryUnits { units: String },
    /// Unit string that does not parse
    InvalidUnits { units: String },
    /// Units not convertible to the canonical unit of the standard name
    UnitsInconsistent {
        units: String,
        standard_name: String,
        canonical: String,
    },
    /// Coordinate without `units`
    MissingUnits,

    // Ranges and fill values
    /// `valid_range` combined with `valid_min`/`valid_max`
    ValidRangeExclusive,
    /// `_FillValue` type differs from the variable's
    FillValueType { element_type: ElementType },
    /// `_FillValue` inside `valid_range`
    FillValueInsideRange,
    /// `missing_value` type differs from the variable's
    MissingValueType { element_type: ElementType },
    /// `missing_value` and `_FillValue` disagree
    MissingValueDiffers,
    /// `missing_value` without `_FillValue`
    MissingValueDeprecated,
    /// Fill or missing value on a bounds variable
    FillOnBoundary { attribute: &'static str },
    /// Fill or missing value on a climatology variable
    FillOnClimatology { attribute: &'static str },

    // Axis and positive
    /// `axis` outside X, Y, Z, T
    InvalidAxis { value: String },
    /// `axis` contradicts the axis inferred from units/positive
    AxisInconsistent { axis: String, inferred: char },
    /// `positive` other than up or down
    InvalidPositive { value: String },

    // Cell methods
    /// Unparseable `cell_methods` fragment
    CellMethodsSyntax { fragment: String },
    /// `cell_methods` name that is neither a dimension nor a standard name
    CellMethodsName { name: String },
    /// Dimension named in more than one method
    CellMethodsRepeated { name: String },

    // Cell measures
    /// `cell_measures` is not `measure: name` pairs
    CellMeasuresSyntax,
    /// Measure variable the dataset lacks
    CellMeasuresMissingVariable { name: String },
    /// Measure variable spans dimensions the data variable lacks
    CellMeasuresDimensions { name: String, dimensions: Vec<String> },
    /// Measure other than area or volume
    CellMeasuresInvalidMeasure { measure: String },
    /// Measure variable with the wrong units
    CellMeasuresUnits { measure: String, expected: &'static str },

    // Formula terms
    /// `formula_terms` without a `standard_name`
    FormulaNoStandardName,
    /// No formula for the standard name
    FormulaUnknown { standard_name: String },
    /// `formula_terms` is not `term: variable` pairs
    FormulaTermsSyntax,
    /// Term not used by the formula
    FormulaTermMissing { term: String },
    /// Term points at a variable the dataset lacks
    FormulaVariableMissing { name: String },

    // Compression
    /// `compress` on a non-integer variable
    CompressNotInteger,
    /// `compress` is not a dimension list
    CompressSyntax,
    /// `compress` names an unknown dimension
    CompressMissingDimension { name: String },
    /// Compressed index outside `0..product` of the dimension sizes
    CompressOutOfRange { max: i64 },

    // Packed data
    /// `scale_factor` and `add_offset` of different types
    PackingTypeMismatch,
    /// Packing attributes not float or double
    PackingNotFloat,
    /// Packed variable not byte, short or int
    PackedVariableType,
    /// int variable packed with float attributes
    PackedIntFromFloat,

    // Coordinates
    /// Coordinate values not strictly monotonic
    NotMonotonic { variable: String },

    // Grid mapping
    /// Grid mapping variable without `grid_mapping_name`
    GridMappingNameMissing,
    /// Unknown `grid_mapping_name`
    GridMappingNameInvalid { name: String },
    /// Grid mapping variable with dimensions
    GridMappingDimensions,

    // Time
    /// Non-standard calendar without `month_lengths`
    NonStandardCalendar { calendar: String },
    /// Custom calendar attributes alongside a standard calendar
    CalendarAttributesConflict,
    /// `month_lengths` not twelve integers
    MonthLengths,
    /// `leap_year` not a scalar integer
    LeapYear,
    /// `leap_month` outside 1..=12
    LeapMonth,
    /// `leap_month` without `leap_year`
    LeapMonthIgnored,
    /// Time units without a valid reference time
    TimeReference { units: String },
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ConventionsMissing
            | Issue::OutsideCellBounds { .. }
            | Issue::VariableClash { .. }
            | Issue::DimensionOrder
            | Issue::MultiDimCoordinate
            | Issue::MissingDescription
            | Issue::AttributeAttachment { .. }
            | Issue::DeprecatedUnits { .. }
            | Issue::CautionaryUnits { .. }
            | Issue::MissingUnits
            | Issue::FillValueInsideRange
            | Issue::MissingValueDiffers
            | Issue::MissingValueDeprecated
            | Issue::FillOnBoundary { .. }
            | Issue::CellMethodsRepeated { .. }
            | Issue::PackedIntFromFloat
            | Issue::GridMappingDimensions
            | Issue::LeapMonthIgnored => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Issue::ConventionsMissing | Issue::ConventionsUnsupported { .. } => {
                Category::Conventions
            }
            Issue::CoordinatesSyntax { .. }
            | Issue::CoordinatesMissingVariable { .. }
            | Issue::LabelDimensionCount { .. }
            | Issue::LabelLeadingDimension { .. }
            | Issue::AuxDimensionsNotSubset { .. }
            | Issue::BoundsSyntax { .. }
            | Issue::BoundsMissingVariable { .. }
            | Issue::BoundsNotNumeric { .. }
            | Issue::BoundsDimensionCount { .. }
            | Issue::BoundsDimensions { .. }
            | Issue::BoundsInconsistent { .. }
            | Issue::OutsideCellBounds { .. }
            | Issue::GridMappingSyntax { .. }
            | Issue::GridMappingMissingVariable { .. } => Category::Reference,
            Issue::InvalidVariableName { .. }
            | Issue::VariableClash { .. }
            | Issue::InvalidAttributeName { .. } => Category::Naming,
            Issue::DuplicateAxis { .. }
            | Issue::DimensionOrder
            | Issue::RepeatedDimensions
            | Issue::InvalidAxis { .. }
            | Issue::AxisInconsistent { .. }
            | Issue::InvalidPositive { .. } => Category::Dimensions,
            Issue::MissingDescription
            | Issue::StandardNameWhitespace { .. }
            | Issue::InvalidStandardName { .. } => Category::Description,
            Issue::AttributeType { .. }
            | Issue::AttributeAttachment { .. }
            | Issue::TimeAttributeMisplaced { .. } => Category::Attribute,
            Issue::UnitsNotString
            | Issue::DeprecatedUnits { .. }
            | Issue::CautionaryUnits { .. }
            | Issue::InvalidUnits { .. }
            | Issue::UnitsInconsistent { .. }
            | Issue::MissingUnits => Category::Units,
            Issue::ValidRangeExclusive => Category::Range,
            Issue::FillValueType { .. }
            | Issue::FillValueInsideRange
            | Issue::MissingValueType { .. }
            | Issue::MissingValueDiffers
            | Issue::MissingValueDeprecated
            | Issue::FillOnBoundary { .. }
            | Issue::FillOnClimatology { .. } => Category::FillValue,
            Issue::CellMethodsSyntax { .. }
            | Issue::CellMethodsName { .. }
            | Issue::CellMethodsRepeated { .. } => Category::CellMethods,
            Issue::CellMeasuresSyntax
            | Issue::CellMeasuresMissingVariable { .. }
            | Issue::CellMeasuresDimensions { .. }
            | Issue::CellMeasuresInvalidMeasure { .. }
            | Issue::CellMeasuresUnits { .. } => Category::CellMeasures,
            Issue::FormulaNoStandardName
            | Issue::FormulaUnknown { .. }
            | Issue::FormulaTermsSyntax
            | Issue::FormulaTermMissing { .. }
            | Issue::FormulaVariableMissing { .. } => Category::FormulaTerms,
            Issue::CompressNotInteger
            | Issue::CompressSyntax
            | Issue::CompressMissingDimension { .. }
            | Issue::CompressOutOfRange { .. } => Category::Compress,
            Issue::PackingTypeMismatch
            | Issue::PackingNotFloat
            | Issue::PackedVariableType
            | Issue::PackedIntFromFloat => Category::Packing,
            Issue::MultiDimCoordinate | Issue::NotMonotonic { .. } => Category::Coordinate,
            Issue::GridMappingNameMissing
            | Issue::GridMappingNameInvalid { .. }
            | Issue::GridMappingDimensions => Category::GridMapping,
            Issue::NonStandardCalendar { .. }
            | Issue::CalendarAttributesConflict
            | Issue::MonthLengths
            | Issue::LeapYear
            | Issue::LeapMonth
            | Issue::LeapMonthIgnored
            | Issue::TimeReference { .. } => Category::Time,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::ConventionsMissing => "No 'Conventions' attribute present".to_string(),
            Issue::ConventionsUnsupported { value } => format!(
                "This dataset does not appear to contain CF Convention data (Conventions = '{value}')"
            ),

            Issue::CoordinatesSyntax { variable } => {
                format!("Invalid syntax for 'coordinates' attribute in {variable}")
            }
            Issue::CoordinatesMissingVariable { name } => {
                format!("coordinates attribute referencing non-existent variable: {name}")
            }
            Issue::LabelDimensionCount { label, count } => format!(
                "Label variable {label} must have 2 dimensions only (has {count})"
            ),
            Issue::LabelLeadingDimension { label, variable } => format!(
                "Leading dimension of label variable {label} must match one of those for {variable}"
            ),
            Issue::AuxDimensionsNotSubset { aux, variable } => {
                format!("Dimensions of {aux} must be a subset of dimensions of {variable}")
            }
            Issue::BoundsSyntax { kind } => {
                format!("Invalid syntax for '{}' attribute", kind.attribute())
            }
            Issue::BoundsMissingVariable { kind, name } => format!(
                "{} attribute referencing non-existent variable: {name}",
                kind.attribute()
            ),
            Issue::BoundsNotNumeric { kind, name } => format!(
                "{} variable {name} has non-numeric data type",
                kind.label()
            ),
            Issue::BoundsDimensionCount { kind, name } => format!(
                "Incorrect number of dimensions for {} variable: {name}",
                kind.label().to_lowercase()
            ),
            Issue::BoundsDimensions { kind, name } => format!(
                "Incorrect dimensions for {} variable: {name}",
                kind.label().to_lowercase()
            ),
            Issue::BoundsInconsistent {
                kind,
                name,
                property,
                variable,
            } => format!(
                "{} var {name} has inconsistent {property} to {variable}",
                kind.label()
            ),
            Issue::OutsideCellBounds { variable } => {
                format!("Data for variable {variable} lies outside cell boundaries")
            }
            Issue::GridMappingSyntax { variable } => {
                format!("{variable} - Invalid syntax for 'grid_mapping' attribute")
            }
            Issue::GridMappingMissingVariable { name } => {
                format!("grid_mapping attribute referencing non-existent variable {name}")
            }

            Issue::InvalidVariableName { name } => format!("Invalid variable name - {name}"),
            Issue::VariableClash { name, existing } => {
                format!("variable clash: {name} differs from {existing} only in case")
            }
            Issue::InvalidAttributeName { attribute } => {
                format!("Invalid attribute name - {attribute}")
            }

            Issue::DuplicateAxis { axis } => {
                format!("Variable has more than 1 coordinate variable with axis {axis}")
            }
            Issue::DimensionOrder => "space/time dimensions appear in incorrect order".to_string(),
            Issue::RepeatedDimensions => "variable has repeated dimensions".to_string(),
            Issue::MultiDimCoordinate => "The name of a multi-dimensional coordinate variable \
                 should not match the name of any of its dimensions"
                .to_string(),

            Issue::MissingDescription => "No standard_name or long_name attributes".to_string(),
            Issue::StandardNameWhitespace { name } => {
                format!("Whitespace not allowed in standard_name: '{name}'")
            }
            Issue::InvalidStandardName { name } => format!("Invalid standard_name: {name}"),

            Issue::AttributeType {
                attribute,
                expected,
            } => format!(
                "Attribute {attribute} of incorrect type (expected {})",
                expected.as_str()
            ),
            Issue::AttributeAttachment { attribute, role } => {
                format!("attribute {attribute} attached to wrong kind of variable ({role})")
            }
            Issue::TimeAttributeMisplaced { attribute } => {
                format!("Attribute {attribute} may only be attached to time coordinate variable")
            }

            Issue::UnitsNotString => "units attribute must be of type 'String'".to_string(),
            Issue::DeprecatedUnits { units } => format!("units {units} is deprecated"),
            Issue::CautionaryUnits { units } if units == "month" => {
                "The unit 'month', defined by udunits to be exactly year/12, \
                 should be used with caution"
                    .to_string()
            }
            Issue::CautionaryUnits { units } => format!(
                "The unit '{units}', defined by udunits to be exactly 365.242198781 days, \
                 should be used with caution. It is not a calendar year"
            ),
            Issue::InvalidUnits { units } => format!("Invalid units: {units}"),
            Issue::UnitsInconsistent {
                units,
                standard_name,
                canonical,
            } => format!(
                "Units are not consistent with those given in the standard_name table \
                 ('{units}' vs '{canonical}' for {standard_name})"
            ),
            Issue::MissingUnits => "units attribute should be present".to_string(),

            Issue::ValidRangeExclusive => {
                "Illegal use of valid_range and valid_min/valid_max".to_string()
            }
            Issue::FillValueType { element_type } => {
                format!("_FillValue of different type to variable ({element_type})")
            }
            Issue::FillValueInsideRange => "_FillValue should be outside valid_range".to_string(),
            Issue::MissingValueType { element_type } => {
                format!("missing_value of different type to variable ({element_type})")
            }
            Issue::MissingValueDiffers => {
                "missing_value and _FillValue set to differing values".to_string()
            }
            Issue::MissingValueDeprecated => {
                "Use of 'missing_value' attribute is deprecated".to_string()
            }
            Issue::FillOnBoundary { attribute } => {
                format!("Boundary variable should not have {attribute} attribute")
            }
            Issue::FillOnClimatology { attribute } => {
                format!("Climatology variable must not have {attribute} attribute")
            }

            Issue::InvalidAxis { value } => format!("Invalid value for axis attribute: {value}"),
            Issue::AxisInconsistent { axis, inferred } => format!(
                "axis attribute {axis} inconsistent with coordinate type {inferred} \
                 as deduced from units and/or positive"
            ),
            Issue::InvalidPositive { value } => {
                format!("Invalid value for positive attribute: {value}")
            }

            Issue::CellMethodsSyntax { fragment } => {
                format!("Invalid cell_methods syntax: '{fragment}'")
            }
            Issue::CellMethodsName { name } => {
                format!("Invalid 'name' in cell_methods attribute: {name}")
            }
            Issue::CellMethodsRepeated { name } => {
                format!("Multiple cell_methods entries for dimension: {name}")
            }

            Issue::CellMeasuresSyntax => "Invalid cell_measures syntax".to_string(),
            Issue::CellMeasuresMissingVariable { name } => {
                format!("cell_measures referring to variable that doesn't exist: {name}")
            }
            Issue::CellMeasuresDimensions { name, dimensions } => format!(
                "Dimensions of {name} must be same or a subset of [{}]",
                dimensions.join(", ")
            ),
            Issue::CellMeasuresInvalidMeasure { measure } => {
                format!("Invalid measure in attribute cell_measures: {measure}")
            }
            Issue::CellMeasuresUnits { measure, expected } => {
                format!("Must have units of {expected} for {measure} measure")
            }

            Issue::FormulaNoStandardName => {
                "Cannot get formula definition as no standard_name".to_string()
            }
            Issue::FormulaUnknown { standard_name } => {
                format!("No formula defined for standard name: {standard_name}")
            }
            Issue::FormulaTermsSyntax => "Invalid formula_terms syntax".to_string(),
            Issue::FormulaTermMissing { term } => format!("term {term} not present in formula"),
            Issue::FormulaVariableMissing { name } => {
                format!("{name} is not declared as a variable")
            }

            Issue::CompressNotInteger => {
                "compress attribute can only be attached to variable of integer type".to_string()
            }
            Issue::CompressSyntax => "Invalid syntax for 'compress' attribute".to_string(),
            Issue::CompressMissingDimension { name } => {
                format!("compress attribute naming nonexistent dimension: {name}")
            }
            Issue::CompressOutOfRange { max } => {
                format!("compressed index values must be in the range 0 to {max}")
            }

            Issue::PackingTypeMismatch => {
                "scale_factor and add_offset must be the same numeric data type".to_string()
            }
            Issue::PackingNotFloat => {
                "scale_factor and add_offset must be of type float or double".to_string()
            }
            Issue::PackedVariableType => {
                "packed variable must be of type byte, short or int".to_string()
            }
            Issue::PackedIntFromFloat => {
                "packed variable should not be of type int when packing with float".to_string()
            }

            Issue::NotMonotonic { variable } => {
                format!("co-ordinate variable '{variable}' not monotonic")
            }

            Issue::GridMappingNameMissing => "No grid_mapping_name attribute set".to_string(),
            Issue::GridMappingNameInvalid { name } => {
                format!("Invalid grid_mapping_name: {name}")
            }
            Issue::GridMappingDimensions => {
                "grid_mapping variable should have 0 dimensions".to_string()
            }

            Issue::NonStandardCalendar { calendar } => format!(
                "Non-standard calendar '{calendar}', so month_lengths attribute must be present"
            ),
            Issue::CalendarAttributesConflict => "The attributes 'month_lengths', 'leap_year' \
                 and 'leap_month' must not appear when a standard 'calendar' is present"
                .to_string(),
            Issue::MonthLengths => {
                "Attribute 'month_lengths' should be an integer array of size 12".to_string()
            }
            Issue::LeapYear => "leap_year should be a scalar integer value".to_string(),
            Issue::LeapMonth => "leap_month should be between 1 and 12".to_string(),
            Issue::LeapMonthIgnored => {
                "leap_month is ignored as leap_year NOT specified".to_string()
            }
            Issue::TimeReference { units } => {
                format!("Invalid units and/or reference time: {units}")
            }
        }
    }

    /// Record the issue against `variable` (`None` for the dataset itself).
    pub fn into_diagnostic(self, variable: Option<&str>) -> Diagnostic {
        Diagnostic {
            severity: self.severity(),
            category: self.category(),
            variable: variable.map(str::to_string),
            message: self.message(),
        }
    }
}
