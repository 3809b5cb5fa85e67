use std::path::PathBuf;

use anyhow::{Context, Result};
use cf_standards::standard_names_path;
use cf_validate::{ValidationReport, write_report_json};
use tracing::warn;

use cf_cli::check::{CheckSettings, Checker, report_path};

use crate::cli::Cli;

/// What happened to one input file.
pub struct FileOutcome {
    pub path: PathBuf,
    /// The report, or the rendered load error.
    pub result: Result<ValidationReport, String>,
    pub report_file: Option<PathBuf>,
}

pub struct CheckRun {
    pub table_version: Option<String>,
    pub outcomes: Vec<FileOutcome>,
}

impl CheckRun {
    /// A run fails when any dataset has errors or could not be read.
    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(|outcome| match &outcome.result {
            Ok(report) => !report.passed(),
            Err(_) => true,
        })
    }
}

pub fn run_check(cli: &Cli) -> Result<CheckRun> {
    let settings = CheckSettings {
        standard_names: standard_names_path(cli.standard_names.as_deref()),
        extra_units: cli.extra_units.clone(),
        conventions: cli.conventions.clone(),
    };
    let checker = Checker::load(&settings)?;
    let several = cli.files.len() > 1;

    let mut outcomes = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let outcome = match checker.check_file(path) {
            Ok(report) => {
                let report_file = match &cli.report {
                    Some(base) => {
                        let target = report_path(base, path, several);
                        write_report_json(&target, &report)
                            .with_context(|| format!("write report {}", target.display()))?;
                        Some(target)
                    }
                    None => None,
                };
                FileOutcome {
                    path: path.clone(),
                    result: Ok(report),
                    report_file,
                }
            }
            Err(error) => {
                warn!(path = %path.display(), "dataset skipped");
                FileOutcome {
                    path: path.clone(),
                    result: Err(format!("{error:#}")),
                    report_file: None,
                }
            }
        };
        outcomes.push(outcome);
    }

    Ok(CheckRun {
        table_version: checker.names().version().map(str::to_string),
        outcomes,
    })
}
