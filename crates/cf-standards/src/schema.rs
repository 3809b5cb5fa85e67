//! Attribute schema: declared value kind and allowed attachments.

use std::collections::BTreeMap;
use std::fmt;

use cf_model::ValueKind;
use serde::Serialize;

/// Kind of owner an attribute is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attachment {
    /// Coordinate or auxiliary coordinate variable.
    Coordinate,
    /// Any other variable.
    Data,
    /// The dataset itself.
    Global,
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attachment::Coordinate => "coordinate",
            Attachment::Data => "data",
            Attachment::Global => "global",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSpec {
    pub kind: ValueKind,
    pub attachments: Vec<Attachment>,
}

impl AttributeSpec {
    pub fn allows(&self, attachment: Attachment) -> bool {
        self.attachments.contains(&attachment)
    }
}

/// Attributes that only make sense on a time coordinate.
pub const TIME_ATTRIBUTES: &[&str] = &[
    "calendar",
    "month_lengths",
    "leap_year",
    "leap_month",
    "climatology",
];

#[derive(Debug, Clone, Default)]
pub struct AttributeSchema {
    specs: BTreeMap<String, AttributeSpec>,
}

impl AttributeSchema {
    /// Attribute table of CF-1.0, Appendix A.
    pub fn cf_1_0() -> Self {
        use Attachment::{Coordinate as C, Data as D, Global as G};
        use ValueKind::{Numeric as N, String as S};

        let table: &[(&str, ValueKind, &[Attachment])] = &[
            ("add_offset", N, &[D]),
            ("ancillary_variables", S, &[D]),
            ("axis", S, &[C]),
            ("bounds", S, &[C]),
            ("calendar", S, &[C]),
            ("cell_measures", S, &[D]),
            ("cell_methods", S, &[D]),
            ("climatology", S, &[C]),
            ("comment", S, &[G, D]),
            ("compress", S, &[C]),
            ("Conventions", S, &[G]),
            ("coordinates", S, &[D]),
            ("_FillValue", N, &[D]),
            ("flag_meanings", S, &[D]),
            ("flag_values", S, &[D]),
            ("formula_terms", S, &[C]),
            ("grid_mapping", S, &[D]),
            ("history", S, &[G]),
            ("institution", S, &[G, D]),
            ("leap_month", N, &[C]),
            ("leap_year", N, &[C]),
            ("long_name", S, &[C, D]),
            ("missing_value", N, &[D]),
            ("month_lengths", N, &[C]),
            ("positive", S, &[C]),
            ("references", S, &[G, D]),
            ("scale_factor", N, &[D]),
            ("source", S, &[G, D]),
            ("standard_error_multiplier", N, &[D]),
            ("standard_name", S, &[C, D]),
            ("title", S, &[G]),
            ("units", S, &[C, D]),
            ("valid_max", N, &[C, D]),
            ("valid_min", N, &[C, D]),
            ("valid_range", N, &[C, D]),
        ];

        let mut schema = Self::default();
        for (name, kind, attachments) in table {
            schema.insert(*name, *kind, attachments);
        }
        schema
    }

    pub fn insert(&mut self, name: impl Into<String>, kind: ValueKind, attachments: &[Attachment]) {
        self.specs.insert(
            name.into(),
            AttributeSpec {
                kind,
                attachments: attachments.to_vec(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.specs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeSpec)> {
        self.specs.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn is_time_attribute(name: &str) -> bool {
        TIME_ATTRIBUTES.contains(&name)
    }
}
