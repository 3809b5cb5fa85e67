use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Convention violation.
    Error,
    /// Discouraged but legal, or ambiguous.
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Area of the convention a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Conventions,
    Naming,
    Attribute,
    Description,
    Reference,
    Dimensions,
    Units,
    CellMethods,
    CellMeasures,
    FormulaTerms,
    Compress,
    FillValue,
    Range,
    Packing,
    Coordinate,
    GridMapping,
    Time,
}

impl Category {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Conventions,
            Self::Naming,
            Self::Attribute,
            Self::Description,
            Self::Reference,
            Self::Dimensions,
            Self::Units,
            Self::CellMethods,
            Self::CellMeasures,
            Self::FormulaTerms,
            Self::Compress,
            Self::FillValue,
            Self::Range,
            Self::Packing,
            Self::Coordinate,
            Self::GridMapping,
            Self::Time,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Conventions => "Conventions",
            Self::Naming => "Naming",
            Self::Attribute => "Attribute",
            Self::Description => "Description",
            Self::Reference => "Reference",
            Self::Dimensions => "Dimensions",
            Self::Units => "Units",
            Self::CellMethods => "Cell methods",
            Self::CellMeasures => "Cell measures",
            Self::FormulaTerms => "Formula terms",
            Self::Compress => "Compression",
            Self::FillValue => "Fill value",
            Self::Range => "Valid range",
            Self::Packing => "Packed data",
            Self::Coordinate => "Coordinate",
            Self::GridMapping => "Grid mapping",
            Self::Time => "Time",
        }
    }
}

/// A single recorded condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,
    /// Variable the condition was found on; `None` for global conditions.
    pub variable: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Accumulated result of a validation run.
///
/// Counters only ever grow; a run is conformant when no error was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    error_count: usize,
    warning_count: usize,
    messages: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.messages.push(diagnostic);
    }

    pub fn extend<I>(&mut self, diagnostics: I)
    where
        I: IntoIterator<Item = Diagnostic>,
    {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    /// Append everything recorded in `other`, preserving its order.
    pub fn merge(&mut self, other: Diagnostics) {
        self.extend(other.messages);
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Verdict of the run.
    pub fn passed(&self) -> bool {
        !self.has_errors()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Diagnostics recorded against one variable, in order.
    pub fn for_variable<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.messages
            .iter()
            .filter(move |diagnostic| diagnostic.variable.as_deref() == Some(variable))
    }

    /// Global diagnostics (not tied to a variable), in order.
    pub fn global(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages
            .iter()
            .filter(|diagnostic| diagnostic.variable.is_none())
    }

    pub fn count_in(&self, category: Category, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|d| d.category == category && d.severity == severity)
            .count()
    }
}
