//! Data model shared by the CF convention checker crates.

pub mod conformance;
pub mod dataset;
pub mod error;
pub mod lookup;

pub use conformance::{Category, Diagnostic, Diagnostics, Severity};
pub use dataset::{
    AttrValue, Attributes, Dataset, DatasetProvider, ElementType, ValueKind, Variable,
};
pub use error::{ModelError, Result};
pub use lookup::CaseInsensitiveSet;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_counts() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic {
            severity: Severity::Error,
            category: Category::Units,
            variable: Some("ta".to_string()),
            message: "Invalid units: foo".to_string(),
        });
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            category: Category::Conventions,
            variable: None,
            message: "No 'Conventions' attribute present".to_string(),
        });
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.warning_count(), 1);
        assert!(diagnostics.has_errors());
        assert!(!diagnostics.passed());
        assert_eq!(diagnostics.for_variable("ta").count(), 1);
        assert_eq!(diagnostics.global().count(), 1);
    }

    #[test]
    fn case_insensitive_set_reports_first_spelling() {
        let mut set = CaseInsensitiveSet::default();
        assert_eq!(set.insert("Temp"), None);
        assert_eq!(set.insert("TEMP"), Some("Temp"));
        assert!(set.contains("temp"));
        assert_eq!(set.len(), 1);
    }
}
