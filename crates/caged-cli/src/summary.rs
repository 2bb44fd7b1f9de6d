use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;
use serde_json::json;

use caged_cli::pipeline::RunSummary;
use caged_model::{QualityReport, QualityStatus};
use caged_store::str_value;

use crate::commands::Inspection;

pub fn print_run_summary(summary: &RunSummary, as_json: bool) -> Result<()> {
    if as_json {
        let value = json!({
            "raw_file": summary.raw_file,
            "dataset_root": summary.dataset_root,
            "report": summary.report,
        });
        println!("{}", serde_json::to_string_pretty(&value).context("encode run summary")?);
        return Ok(());
    }
    println!("Raw file: {}", summary.raw_file.display());
    println!("Dataset: {}", summary.dataset_root.display());
    println!("{}", report_table(&summary.report));
    Ok(())
}

pub fn print_report(dataset_root: &Path, report: &QualityReport, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(report).context("encode quality report")?);
        return Ok(());
    }
    println!("Dataset: {}", dataset_root.display());
    println!("{}", report_table(report));
    Ok(())
}

pub fn print_inspection(inspection: &Inspection) -> Result<()> {
    println!("Dataset: {}", inspection.dataset_root.display());
    println!("Total rows: {}", inspection.total_rows);
    println!("Columns: {}", inspection.columns.join(", "));
    println!("{}", frame_table(&inspection.sample)?);

    if let Some(region) = &inspection.region {
        println!();
        println!("Region {}: {} rows", region.region, region.rows);
        match region.mean_wage {
            Some(mean) => println!("Mean wage: {mean:.2}"),
            None => println!("Mean wage: -"),
        }
        if region.rows > 0 {
            println!("{}", frame_table(&region.sample)?);
        }
    }
    Ok(())
}

fn report_table(report: &QualityReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Status"),
        header_cell("Records"),
        header_cell("Partitions"),
        header_cell("Files"),
        header_cell("Size (MB)"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        status_cell(report.status),
        Cell::new(report.total_records),
        count_cell(report.total_partitions),
        count_cell(report.total_files),
        Cell::new(format!("{:.2}", report.size_mb)),
    ]);
    table
}

fn frame_table(frame: &DataFrame) -> Result<Table> {
    let names: Vec<String> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let mut table = Table::new();
    table.set_header(names.iter().map(|name| header_cell(name)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for row in 0..frame.height() {
        let mut cells = Vec::with_capacity(names.len());
        for name in &names {
            let value = str_value(frame, name, row).with_context(|| format!("format {name}"))?;
            cells.push(match value {
                Some(value) => Cell::new(value),
                None => dim_cell("null"),
            });
        }
        table.add_row(cells);
    }
    Ok(table)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: QualityStatus) -> Cell {
    match status {
        QualityStatus::Passed => Cell::new("PASSED")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        QualityStatus::Failed => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
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
