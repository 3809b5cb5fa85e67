use std::collections::BTreeSet;

use cf_standards::{AttributeSchema, CanonicalNameTable, FormulaRegistry};
use cf_units::UnitSystem;

/// Run-wide settings that do not come from reference tables.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Accepted values of the `Conventions` global attribute.
    pub conventions: Vec<String>,
    /// Unit strings accepted without parsing.
    pub extra_units: BTreeSet<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            conventions: vec!["CF-1.0".to_string()],
            extra_units: BTreeSet::new(),
        }
    }
}

/// Everything a validation run reads besides the dataset.
#[derive(Debug, Clone)]
pub struct ValidationContext<'a, U: UnitSystem> {
    pub units: &'a U,
    pub names: &'a CanonicalNameTable,
    pub schema: AttributeSchema,
    pub formulas: FormulaRegistry,
    pub options: ValidationOptions,
}

impl<'a, U: UnitSystem> ValidationContext<'a, U> {
    pub fn new(units: &'a U, names: &'a CanonicalNameTable) -> Self {
        Self {
            units,
            names,
            schema: AttributeSchema::cf_1_0(),
            formulas: FormulaRegistry::cf_1_0(),
            options: ValidationOptions::default(),
        }
    }

    pub fn with_schema(mut self, schema: AttributeSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_formulas(mut self, formulas: FormulaRegistry) -> Self {
        self.formulas = formulas;
        self
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_conventions<I, S>(mut self, conventions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.conventions = conventions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extra_units(mut self, extra_units: BTreeSet<String>) -> Self {
        self.options.extra_units = extra_units;
        self
    }
}
