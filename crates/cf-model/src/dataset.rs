//! In-memory dataset model.
//!
//! A dataset is a set of named variables, each with ordered dimensions, an
//! element type, a map of attributes and (optionally) materialized values.
//! The validation engine only reads through [`DatasetProvider`]; [`Dataset`]
//! is the provider used by the CLI and by tests.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Element type of a variable or of a numeric attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Byte,
    #[serde(alias = "character")]
    Char,
    Short,
    #[serde(alias = "integer")]
    Int,
    Float,
    Double,
}

impl ElementType {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ElementType::Char)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ElementType::Byte | ElementType::Short | ElementType::Int
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, ElementType::Float | ElementType::Double)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Byte => "byte",
            ElementType::Char => "char",
            ElementType::Short => "short",
            ElementType::Int => "int",
            ElementType::Float => "float",
            ElementType::Double => "double",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "byte" => Ok(ElementType::Byte),
            "char" | "character" => Ok(ElementType::Char),
            "short" => Ok(ElementType::Short),
            "int" | "integer" => Ok(ElementType::Int),
            "float" => Ok(ElementType::Float),
            "double" => Ok(ElementType::Double),
            _ => Err(format!("Unknown element type: {s}")),
        }
    }
}

/// Kind of value an attribute carries, in the string/numeric sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Numeric,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Numeric => "numeric",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute value as read from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAttrValue", into = "RawAttrValue")]
pub enum AttrValue {
    Text(String),
    Number { kind: ElementType, value: f64 },
    Sequence { kind: ElementType, values: Vec<f64> },
    Absent,
}

impl AttrValue {
    pub fn text(value: impl Into<String>) -> Self {
        AttrValue::Text(value.into())
    }

    pub fn int(value: i64) -> Self {
        AttrValue::Number {
            kind: ElementType::Int,
            value: value as f64,
        }
    }

    pub fn float(value: f64) -> Self {
        AttrValue::Number {
            kind: ElementType::Float,
            value,
        }
    }

    pub fn double(value: f64) -> Self {
        AttrValue::Number {
            kind: ElementType::Double,
            value,
        }
    }

    pub fn sequence(kind: ElementType, values: impl Into<Vec<f64>>) -> Self {
        AttrValue::Sequence {
            kind,
            values: values.into(),
        }
    }

    /// String/numeric kind, or `None` for an absent value.
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            AttrValue::Text(_) => Some(ValueKind::String),
            AttrValue::Number { .. } | AttrValue::Sequence { .. } => Some(ValueKind::Numeric),
            AttrValue::Absent => None,
        }
    }

    /// Element type of a numeric value.
    pub fn numeric_type(&self) -> Option<ElementType> {
        match self {
            AttrValue::Number { kind, .. } | AttrValue::Sequence { kind, .. } => Some(*kind),
            AttrValue::Text(_) | AttrValue::Absent => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Numeric values as a slice view; a scalar is a one-element slice.
    pub fn numbers(&self) -> &[f64] {
        match self {
            AttrValue::Number { value, .. } => std::slice::from_ref(value),
            AttrValue::Sequence { values, .. } => values,
            AttrValue::Text(_) | AttrValue::Absent => &[],
        }
    }

    /// First numeric value, if any.
    pub fn first_number(&self) -> Option<f64> {
        self.numbers().first().copied()
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, AttrValue::Absent)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(value) => write!(f, "{value:?}"),
            AttrValue::Number { value, .. } => write!(f, "{value}"),
            AttrValue::Sequence { values, .. } => {
                let parts: Vec<String> = values.iter().map(f64::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            AttrValue::Absent => f.write_str("none"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// Serialized form of an attribute value.
///
/// Bare JSON integers default to `int`, other numbers to `double`; an explicit
/// `{"type": ..., "value"|"values": ...}` object selects the element type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawAttrValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Integers(Vec<i64>),
    Floats(Vec<f64>),
    Typed(TypedRaw),
    Null,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TypedRaw {
    #[serde(rename = "type")]
    kind: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<Vec<f64>>,
}

impl TryFrom<RawAttrValue> for AttrValue {
    type Error = ModelError;

    fn try_from(raw: RawAttrValue) -> Result<Self> {
        Ok(match raw {
            RawAttrValue::Typed(typed) => match (typed.value, typed.values) {
                (Some(value), None) => AttrValue::Number {
                    kind: typed.kind,
                    value,
                },
                (None, Some(values)) => AttrValue::Sequence {
                    kind: typed.kind,
                    values,
                },
                _ => {
                    return Err(ModelError::InvalidAttribute(
                        "typed attribute needs exactly one of `value` or `values`".to_string(),
                    ));
                }
            },
            RawAttrValue::Text(value) => AttrValue::Text(value),
            RawAttrValue::Integer(value) => AttrValue::int(value),
            RawAttrValue::Float(value) => AttrValue::double(value),
            RawAttrValue::Integers(values) => AttrValue::Sequence {
                kind: ElementType::Int,
                values: values.into_iter().map(|v| v as f64).collect(),
            },
            RawAttrValue::Floats(values) => AttrValue::Sequence {
                kind: ElementType::Double,
                values,
            },
            RawAttrValue::Null => AttrValue::Absent,
        })
    }
}

impl From<AttrValue> for RawAttrValue {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Text(text) => RawAttrValue::Text(text),
            AttrValue::Number { kind, value } => RawAttrValue::Typed(TypedRaw {
                kind,
                value: Some(value),
                values: None,
            }),
            AttrValue::Sequence { kind, values } => RawAttrValue::Typed(TypedRaw {
                kind,
                value: None,
                values: Some(values),
            }),
            AttrValue::Absent => RawAttrValue::Null,
        }
    }
}

/// Attribute map keyed by attribute name.
pub type Attributes = BTreeMap<String, AttrValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
}

impl Variable {
    pub fn new(name: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            name: name.into(),
            dimensions: Vec::new(),
            element_type,
            attributes: Attributes::new(),
            values: None,
        }
    }

    #[must_use]
    pub fn with_dimensions<I, S>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_values(mut self, values: impl Into<Vec<f64>>) -> Self {
        self.values = Some(values.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// String value of an attribute, `None` when absent or not a string.
    pub fn text_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(AttrValue::as_text)
    }
}

/// Read-only access to a dataset, as consumed by the validation engine.
pub trait DatasetProvider {
    /// Variable identifiers in declared order.
    fn variable_names(&self) -> Vec<&str>;

    fn dimensions_of(&self, variable: &str) -> Option<&[String]>;

    fn attributes_of(&self, variable: &str) -> Option<&Attributes>;

    fn element_type(&self, variable: &str) -> Option<ElementType>;

    /// Materialized values of a variable, flattened in row-major order.
    fn values_of(&self, variable: &str) -> Option<Cow<'_, [f64]>>;

    /// Length of a declared dimension.
    fn dimension_len(&self, dimension: &str) -> Option<usize>;

    fn global_attributes(&self) -> &Attributes;

    /// Name of the dataset source (file name), when known.
    fn source_name(&self) -> Option<&str> {
        None
    }
}

/// A complete dataset held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub dimensions: BTreeMap<String, usize>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_dimension(mut self, name: impl Into<String>, len: usize) -> Self {
        self.dimensions.insert(name.into(), len);
        self
    }

    #[must_use]
    pub fn with_global_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|variable| variable.name == name)
    }

    /// Parse a dataset from its JSON description.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.ensure_unique_names()?;
        Ok(dataset)
    }

    pub fn from_json_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut dataset = Self::from_json_str(&contents)?;
        if dataset.name.is_none() {
            dataset.name = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string);
        }
        Ok(dataset)
    }

    fn ensure_unique_names(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for variable in &self.variables {
            if !seen.insert(variable.name.as_str()) {
                return Err(ModelError::DuplicateVariable(variable.name.clone()));
            }
        }
        Ok(())
    }
}

impl DatasetProvider for Dataset {
    fn variable_names(&self) -> Vec<&str> {
        self.variables
            .iter()
            .map(|variable| variable.name.as_str())
            .collect()
    }

    fn dimensions_of(&self, variable: &str) -> Option<&[String]> {
        self.variable(variable).map(|v| v.dimensions.as_slice())
    }

    fn attributes_of(&self, variable: &str) -> Option<&Attributes> {
        self.variable(variable).map(|v| &v.attributes)
    }

    fn element_type(&self, variable: &str) -> Option<ElementType> {
        self.variable(variable).map(|v| v.element_type)
    }

    fn values_of(&self, variable: &str) -> Option<Cow<'_, [f64]>> {
        self.variable(variable)
            .and_then(|v| v.values.as_deref())
            .map(Cow::Borrowed)
    }

    fn dimension_len(&self, dimension: &str) -> Option<usize> {
        self.dimensions.get(dimension).copied()
    }

    fn global_attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn source_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
