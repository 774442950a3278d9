//! Terminal rendering for velo commands.
//!
//! Listings such as catalog options or saved configurations go through
//! [`print_output`]. One-off reports like a price breakdown go through
//! [`print_single`]. Status lines carry a colored marker, which `colored`
//! drops when `NO_COLOR` is set.

use std::borrow::Cow;
use std::io;

use colored::{ColoredString, Colorize};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Prints a listing of rows.
///
/// `Minimal` prints only the key column (the first one) of each row, so ids
/// and prices can be piped into other tools.
pub fn print_output<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_table(rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => write_csv(io::stdout(), rows)?,
        OutputFormat::Minimal => {
            for key in key_column(rows) {
                println!("{key}");
            }
        }
    }
    Ok(())
}

/// Prints one report as a CSV record, or as pretty JSON for every other format.
pub fn print_single<T: Serialize>(report: &T, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Csv {
        return write_csv(io::stdout(), std::slice::from_ref(report));
    }
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn render_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return "Nothing to show.".to_string();
    }
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string()
}

fn write_csv<W: io::Write, T: Serialize>(out: W, rows: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn key_column<T: Tabled>(rows: &[T]) -> impl Iterator<Item = String> + '_ {
    rows.iter()
        .filter_map(|row| row.fields().into_iter().next().map(Cow::into_owned))
}

/// Formats an amount with its currency code, e.g. `22.75 EUR`.
pub fn format_money(value: Decimal, currency: &str) -> String {
    format!("{} {}", value.normalize(), currency)
}

#[derive(Debug, Clone, Copy)]
enum Status {
    Ok,
    Failed,
    Warning,
}

impl Status {
    fn marker(self) -> ColoredString {
        match self {
            Status::Ok => "✓".green(),
            Status::Failed => "✗".red(),
            Status::Warning => "⚠".yellow(),
        }
    }
}

fn status_line(status: Status, message: &str) -> String {
    format!("{} {}", status.marker(), message)
}

/// Reports a completed action, such as a saved configuration, on stdout.
pub fn print_success(message: &str) {
    println!("{}", status_line(Status::Ok, message));
}

/// Reports a problem with the selection on stderr.
pub fn print_error(message: &str) {
    eprintln!("{}", status_line(Status::Failed, message));
}

/// Reports something suspicious but not fatal on stderr.
pub fn print_warning(message: &str) {
    eprintln!("{}", status_line(Status::Warning, message));
}

/// Prints a bold heading above a block of `key: value` lines.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        id: &'static str,
        owner: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: "MK00001",
                owner: "shop",
            },
            Row {
                id: "MK00002",
                owner: "web",
            },
        ]
    }

    #[test]
    fn test_minimal_prints_key_column() {
        let keys: Vec<String> = key_column(&rows()).collect();
        assert_eq!(keys, vec!["MK00001", "MK00002"]);
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(render_table::<Row>(&[]), "Nothing to show.");
        assert!(render_table(&rows()).contains("MK00002"));
    }

    #[test]
    fn test_csv_has_header_and_one_record_per_row() {
        let mut out = Vec::new();
        write_csv(&mut out, &rows()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,owner\nMK00001,shop\nMK00002,web\n"
        );
    }

    #[test]
    fn test_money_is_normalized() {
        assert_eq!(format_money(Decimal::new(22750, 3), "EUR"), "22.75 EUR");
        assert_eq!(format_money(Decimal::new(18000, 2), "CHF"), "180 CHF");
    }

    #[test]
    fn test_status_markers() {
        colored::control::set_override(false);
        assert_eq!(status_line(Status::Ok, "Saved MK00001"), "✓ Saved MK00001");
        assert_eq!(status_line(Status::Warning, "stale total"), "⚠ stale total");
    }
}
