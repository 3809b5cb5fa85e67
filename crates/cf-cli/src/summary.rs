use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use cf_model::{Diagnostic, Severity};
use cf_validate::ValidationReport;

use crate::cli::OutputFormatArg;
use crate::commands::{CheckRun, FileOutcome};

pub fn print_summary(run: &CheckRun, format: OutputFormatArg) {
    match format {
        OutputFormatArg::Plain => print_plain(run),
        OutputFormatArg::Table => print_tables(run),
    }
    for outcome in &run.outcomes {
        if let Some(path) = &outcome.report_file {
            println!("Report: {}", path.display());
        }
        if let Err(error) = &outcome.result {
            eprintln!("error: {error}");
        }
    }
}

fn print_plain(run: &CheckRun) {
    for outcome in &run.outcomes {
        if let Ok(report) = &outcome.result {
            print!("{}", report.render_plain());
        }
    }
}

fn print_tables(run: &CheckRun) {
    println!(
        "Standard name table: version {}",
        run.table_version.as_deref().unwrap_or("unknown")
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Variables"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    for outcome in &run.outcomes {
        let report = outcome.result.as_ref().ok();
        if let Some(report) = report {
            total_errors += report.error_count();
            total_warnings += report.warning_count();
        }
        table.add_row(vec![
            Cell::new(outcome.path.display())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            report.map_or_else(|| dim_cell("-"), |r| Cell::new(r.variables.len())),
            count_cell(report.map(ValidationReport::error_count), Color::Red),
            count_cell(report.map(ValidationReport::warning_count), Color::Yellow),
            status_cell(outcome),
        ]);
    }
    if run.outcomes.len() > 1 {
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            count_cell(Some(total_errors), Color::Red).add_attribute(Attribute::Bold),
            count_cell(Some(total_warnings), Color::Yellow).add_attribute(Attribute::Bold),
            dim_cell("-"),
        ]);
    }
    println!("{table}");

    for outcome in &run.outcomes {
        if let Ok(report) = &outcome.result
            && !report.diagnostics.is_empty()
        {
            print_message_table(outcome, report);
        }
    }
}

fn print_message_table(outcome: &FileOutcome, report: &ValidationReport) {
    let mut messages: Vec<&Diagnostic> = report.diagnostics.messages().iter().collect();
    messages.sort_by_key(|diagnostic| severity_rank(diagnostic.severity));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Variable"),
        header_cell("Category"),
        header_cell("Message"),
    ]);
    apply_message_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for diagnostic in messages {
        table.add_row(vec![
            severity_cell(diagnostic.severity),
            match &diagnostic.variable {
                Some(variable) => Cell::new(variable),
                None => dim_cell("(global)"),
            },
            Cell::new(diagnostic.category.label()),
            Cell::new(&diagnostic.message),
        ]);
    }
    println!();
    println!("{}:", outcome.path.display());
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
    ]);
}

fn apply_message_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(9)),
        ColumnConstraint::UpperBoundary(Width::Fixed(20)),
        ColumnConstraint::UpperBoundary(Width::Fixed(14)),
        ColumnConstraint::UpperBoundary(Width::Percentage(70)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(outcome: &FileOutcome) -> Cell {
    match &outcome.result {
        Ok(report) if report.passed() => Cell::new("PASS")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Ok(_) => Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Err(_) => Cell::new("UNREAD").fg(Color::DarkGrey),
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 0,
        Severity::Warning => 1,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
