use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use geolink_ingest::IngestReport;

use crate::types::{InspectSummary, MatchSummary};

pub fn print_match_summary(summary: &MatchSummary) {
    println!("Input: {}", summary.input.display());
    println!("{}", report_table(&summary.report));

    let mut table = Table::new();
    table.set_header(vec![header_cell("Matching"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Strategy"), Cell::new(summary.strategy)]);
    table.add_row(vec![Cell::new("Matched"), count_cell(summary.matched, Color::Green)]);
    table.add_row(vec![
        Cell::new("Empty imputed values"),
        count_cell(summary.missing_values, Color::Yellow),
    ]);
    match summary.distance {
        Some(stats) => {
            table.add_row(vec![Cell::new("Mean distance"), Cell::new(format!("{:.6}", stats.mean))]);
            table.add_row(vec![Cell::new("Max distance"), Cell::new(format!("{:.6}", stats.max))]);
        }
        None => {
            table.add_row(vec![Cell::new("Mean distance"), dim_cell("-")]);
            table.add_row(vec![Cell::new("Max distance"), dim_cell("-")]);
        }
    }
    println!("{table}");

    if summary.dry_run {
        println!("Dry run: no files written");
    } else {
        for path in &summary.written {
            println!("Wrote: {}", path.display());
        }
    }
}

pub fn print_inspect_summary(summary: &InspectSummary) {
    println!("Input: {}", summary.input.display());
    println!("{}", report_table(&summary.report));
}

fn report_table(report: &IngestReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Input rows"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total"), Cell::new(report.total_rows)]);
    table.add_row(vec![
        Cell::new("Outside population"),
        count_cell(report.excluded_population, Color::DarkGrey),
    ]);
    table.add_row(vec![
        Cell::new("Missing coordinates"),
        count_cell(report.dropped_missing_coordinates, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Unparsed values"),
        count_cell(report.unparsed_values, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Participants (reference)")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.participants).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Non-participants (query)")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.non_participants).add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}
