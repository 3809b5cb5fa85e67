//! Validation report rendering and JSON output.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use cf_model::{Category, Diagnostic, Diagnostics, Severity};
use chrono::Utc;
use serde::Serialize;

const REPORT_SCHEMA: &str = "cf-checker.report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Outcome of validating one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub source: Option<String>,
    pub table_version: Option<String>,
    pub table_last_modified: Option<String>,
    /// Variables in the order they were checked.
    pub variables: Vec<String>,
    pub diagnostics: Diagnostics,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.warning_count()
    }

    pub fn passed(&self) -> bool {
        self.diagnostics.passed()
    }

    /// Plain-text report: dataset heading, global messages, one section per
    /// variable and the final totals.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        match &self.source {
            Some(source) => {
                let _ = writeln!(out, "CHECKING dataset: {source}");
            }
            None => out.push_str("CHECKING dataset\n"),
        }
        out.push_str("=====================\n");
        let version = self.table_version.as_deref().unwrap_or("unknown");
        match &self.table_last_modified {
            Some(modified) => {
                let _ = writeln!(out, "Using Standard Name Table Version {version} ({modified})");
            }
            None => {
                let _ = writeln!(out, "Using Standard Name Table Version {version}");
            }
        }
        for diagnostic in self.diagnostics.global() {
            let _ = writeln!(out, "{diagnostic}");
        }

        for variable in &self.variables {
            out.push_str("\n------------------\n");
            let _ = writeln!(out, "Checking variable: {variable}");
            out.push_str("------------------\n");
            for diagnostic in self.diagnostics.for_variable(variable) {
                let _ = writeln!(out, "{diagnostic}");
            }
        }

        let _ = write!(
            out,
            "\nERRORS detected: {}\nWARNINGS given: {}\n",
            self.error_count(),
            self.warning_count()
        );
        out
    }
}

#[derive(Debug, Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    source: Option<&'a str>,
    standard_name_table_version: Option<&'a str>,
    error_count: usize,
    warning_count: usize,
    passed: bool,
    messages: Vec<MessageJson<'a>>,
}

#[derive(Debug, Serialize)]
struct MessageJson<'a> {
    severity: Severity,
    category: Category,
    variable: Option<&'a str>,
    message: &'a str,
}

impl<'a> From<&'a Diagnostic> for MessageJson<'a> {
    fn from(diagnostic: &'a Diagnostic) -> Self {
        Self {
            severity: diagnostic.severity,
            category: diagnostic.category,
            variable: diagnostic.variable.as_deref(),
            message: &diagnostic.message,
        }
    }
}

/// Write the report as versioned JSON.
pub fn write_report_json(path: &Path, report: &ValidationReport) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        source: report.source.as_deref(),
        standard_name_table_version: report.table_version.as_deref(),
        error_count: report.error_count(),
        warning_count: report.warning_count(),
        passed: report.passed(),
        messages: report
            .diagnostics
            .messages()
            .iter()
            .map(MessageJson::from)
            .collect(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
