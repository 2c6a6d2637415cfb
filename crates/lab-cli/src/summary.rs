use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use lab_model::Flag;
use lab_standards::DoctorReport;
use lab_standards::doctor::FileStatus;

use crate::types::EvaluateResult;

pub fn print_evaluation(result: &EvaluateResult) {
    println!("Panel: {} ({})", result.panel_code, result.panel_label);
    if let Some(patient_id) = &result.patient_id {
        println!("Patient: {patient_id}");
    }
    if let Some(path) = &result.record_path {
        println!("Record: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Parameter"),
        header_cell("Result"),
        header_cell("Unit"),
        header_cell("Reference Range"),
        header_cell("Flag"),
    ]);
    apply_result_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for row in &result.rows {
        table.add_row(vec![
            Cell::new(&row.label),
            value_cell(&row.value),
            dim_or_text(row.unit.as_deref()),
            Cell::new(&row.range),
            flag_cell(row.flag),
        ]);
    }
    println!("{table}");
    if result.out_of_range > 0 {
        println!("{} result(s) outside reference range", result.out_of_range);
    }
    if !result.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &result.warnings {
            eprintln!("- {warning}");
        }
    }
}

pub fn print_doctor(report: &DoctorReport) {
    println!("Standards root: {}", report.root.display());
    println!(
        "Pins: panels {} / demographics {}",
        report.panels_pin, report.demographics_pin
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    for entry in &report.entries {
        table.add_row(vec![
            Cell::new(entry.path.display()),
            status_cell(entry.status),
            dim_or_text(entry.detail.as_deref()),
        ]);
    }
    println!("{table}");
    if report.is_healthy() {
        println!("Standards installation is healthy.");
    } else {
        eprintln!("{} problem(s) found.", report.problem_count());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_result_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn flag_cell(flag: Option<Flag>) -> Cell {
    match flag {
        Some(Flag::Normal) => Cell::new("NORMAL").fg(Color::Green),
        Some(Flag::Low) => Cell::new("LOW").fg(Color::Yellow).add_attribute(Attribute::Bold),
        Some(Flag::High) => Cell::new("HIGH").fg(Color::Yellow).add_attribute(Attribute::Bold),
        Some(Flag::Abnormal) => Cell::new("ABNORMAL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Some(Flag::Critical) => Cell::new("CRITICAL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn status_cell(status: FileStatus) -> Cell {
    match status {
        FileStatus::Verified => Cell::new(status.as_str()).fg(Color::Green),
        FileStatus::Missing | FileStatus::Mismatched => Cell::new(status.as_str())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        FileStatus::Unexpected => Cell::new(status.as_str()).fg(Color::Yellow),
    }
}

fn value_cell(value: &str) -> Cell {
    if value.trim().is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_or_text(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
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
