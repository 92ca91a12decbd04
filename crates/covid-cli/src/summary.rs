use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use covid_cli::pipeline::NoteAnalysis;
use covid_model::Severity;

pub fn print_note_summary(analysis: &NoteAnalysis) {
    println!("{}", note_table(analysis));
    if let Some((line, fever)) = analysis.first_temperature() {
        let unit = fever.unit.map(|unit| unit.to_string()).unwrap_or_default();
        if let Some(value) = fever.temperature {
            println!("Temperature: {value} {unit} (line {line})");
        }
    }
    println!(
        "Severity: {} ({})",
        analysis.severity.label().to_uppercase(),
        analysis.severity.code()
    );
}

/// One row per positive feature, with the note lines it came from.
pub fn note_table(analysis: &NoteAnalysis) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Feature"), header_cell("Lines")]);
    apply_summary_table_style(&mut table);

    let mut rows = 0;
    for flag in analysis.symptoms.positive_flags() {
        table.add_row(vec![
            feature_cell(flag),
            Cell::new(format_lines(&analysis.lines_for(flag))),
        ]);
        rows += 1;
    }
    if analysis.diagnosis.has_covid {
        table.add_row(vec![
            feature_cell("has_covid"),
            Cell::new(format_lines(&analysis.covid_lines())),
        ]);
        rows += 1;
    }
    if analysis.diagnosis.has_pneumonia {
        table.add_row(vec![feature_cell("has_pneumonia"), dim_cell("-")]);
        rows += 1;
    }
    if rows == 0 {
        table.add_row(vec![dim_cell("no positive features"), dim_cell("-")]);
    }
    table.add_row(vec![
        Cell::new("severity").add_attribute(Attribute::Bold),
        severity_cell(analysis.severity),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn format_lines(lines: &[usize]) -> String {
    if lines.is_empty() {
        return "-".to_string();
    }
    lines
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn severity_cell(severity: Severity) -> Cell {
    let label = severity.label().to_uppercase();
    match severity {
        Severity::Critical => Cell::new(label)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Severe => Cell::new(label).fg(Color::Red),
        Severity::Mild => Cell::new(label).fg(Color::Yellow),
        Severity::Asymptomatic => Cell::new(label).fg(Color::Green),
        Severity::Unknown => dim_cell(label),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn feature_cell(name: &str) -> Cell {
    Cell::new(name).fg(Color::Blue)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_lists() {
        assert_eq!(format_lines(&[]), "-");
        assert_eq!(format_lines(&[2, 5]), "2, 5");
    }
}
