use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use electoral_cli::commands::CheckReport;
use electoral_ingest::DatasetPreview;
use electoral_model::{MatchVerdict, NotificationLevel};

pub fn print_check_report(report: &CheckReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);

    table.add_row(vec![label_cell("Candidate"), Cell::new(report.candidate.display_name())]);
    table.add_row(vec![label_cell("Verdict"), verdict_cell(&report.verdict)]);
    if let Some(voter) = report.verdict.matched() {
        table.add_row(vec![label_cell("Voter number"), value_cell(&voter.voter_number)]);
        table.add_row(vec![label_cell("Birth date"), value_cell(&voter.birth_date)]);
        table.add_row(vec![label_cell("Birth place"), value_cell(&voter.birth_place)]);
        table.add_row(vec![label_cell("Commune"), value_cell(&voter.commune)]);
        table.add_row(vec![label_cell("Polling place"), value_cell(&voter.polling_place)]);
        table.add_row(vec![label_cell("Polling bureau"), value_cell(&voter.polling_bureau)]);
    }
    table.add_row(vec![
        label_cell("Already registered"),
        flag_cell(report.status.already_registered, report.status.determined),
    ]);
    table.add_row(vec![
        label_cell("Card number"),
        value_cell(report.card_number.as_deref().unwrap_or_default()),
    ]);
    table.add_row(vec![
        label_cell("Elapsed"),
        dim_cell(format!("{} ms", report.elapsed_ms)),
    ]);
    println!("{table}");

    let color = match report.notification.level {
        NotificationLevel::Info => Color::Green,
        NotificationLevel::Warning => Color::Yellow,
    };
    let mut banner = Table::new();
    apply_table_style(&mut banner);
    banner.add_row(vec![Cell::new(&report.notification.message).fg(color)]);
    println!("{banner}");
}

pub fn print_count(count: usize) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Reference entries")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    table.add_row(vec![Cell::new(count).add_attribute(Attribute::Bold)]);
    println!("{table}");
}

pub fn print_preview(preview: &DatasetPreview) {
    println!("File: {}", preview.path.display());
    println!("Encoding: {}", preview.encoding.label());
    println!("Delimiter: {}", preview.delimiter);
    if !preview.missing_columns.is_empty() {
        eprintln!("Missing columns:");
        for column in &preview.missing_columns {
            eprintln!("- {column}");
        }
    }
    let mut table = Table::new();
    table.set_header(preview.headers.iter().map(|h| header_cell(h)));
    apply_table_style(&mut table);
    for row in &preview.rows {
        table.add_row(row.iter().map(|value| value_cell(value)));
    }
    println!("{table}");
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn verdict_cell(verdict: &MatchVerdict) -> Cell {
    match verdict {
        MatchVerdict::Found(_) => Cell::new("FOUND")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        MatchVerdict::NotFound => Cell::new("NOT FOUND").fg(Color::Green),
        MatchVerdict::SourceUnavailable { reason } => {
            Cell::new(format!("UNAVAILABLE: {reason}"))
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        }
    }
}

fn flag_cell(value: bool, determined: bool) -> Cell {
    match (determined, value) {
        (false, _) => dim_cell("?"),
        (true, true) => Cell::new("yes").fg(Color::Yellow),
        (true, false) => Cell::new("no").fg(Color::Green),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Blue)
}

fn value_cell(value: &str) -> Cell {
    if value.trim().is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
