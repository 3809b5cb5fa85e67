//! Checking dataset files against the loaded reference tables.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use cf_model::Dataset;
use cf_standards::{CanonicalNameTable, load_extra_units};
use cf_units::UnitRegistry;
use cf_validate::{ValidationContext, ValidationOptions, ValidationReport, validate};
use tracing::{info, info_span};

/// Where the reference tables come from and which conventions to accept.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub standard_names: PathBuf,
    pub extra_units: Option<PathBuf>,
    pub conventions: Vec<String>,
}

/// Reference tables loaded once and shared by every dataset of a run.
pub struct Checker {
    names: CanonicalNameTable,
    units: UnitRegistry,
    options: ValidationOptions,
}

impl Checker {
    pub fn new(names: CanonicalNameTable, options: ValidationOptions) -> Self {
        Self {
            names,
            units: UnitRegistry::new(),
            options,
        }
    }

    /// Load the standard name table and the extra units list.
    pub fn load(settings: &CheckSettings) -> Result<Self> {
        let names = CanonicalNameTable::from_xml_path(&settings.standard_names).with_context(
            || {
                format!(
                    "load standard name table {}",
                    settings.standard_names.display()
                )
            },
        )?;
        let extra_units = match &settings.extra_units {
            Some(path) => load_extra_units(path)
                .with_context(|| format!("load extra units {}", path.display()))?,
            None => BTreeSet::new(),
        };
        let options = ValidationOptions {
            conventions: settings.conventions.clone(),
            extra_units,
        };
        Ok(Self::new(names, options))
    }

    pub fn names(&self) -> &CanonicalNameTable {
        &self.names
    }

    pub fn check_dataset(&self, dataset: &Dataset) -> ValidationReport {
        let context =
            ValidationContext::new(&self.units, &self.names).with_options(self.options.clone());
        validate(dataset, &context)
    }

    /// Load a dataset description and check it.
    pub fn check_file(&self, path: &Path) -> Result<ValidationReport> {
        let _span = info_span!("dataset", path = %path.display()).entered();
        let start = Instant::now();
        let dataset = Dataset::from_json_path(path)
            .with_context(|| format!("load dataset {}", path.display()))?;
        let report = self.check_dataset(&dataset);
        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "checked dataset"
        );
        Ok(report)
    }
}

/// JSON report location for `dataset`. A single dataset writes to `base`;
/// several datasets write `<stem>.json` files inside `base`.
pub fn report_path(base: &Path, dataset: &Path, several: bool) -> PathBuf {
    if !several {
        return base.to_path_buf();
    }
    let stem = dataset
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    base.join(format!("{stem}.json"))
}
