//! CSV rendering of report rows.
//!
//! Every field is wrapped in double quotes and fields are joined with commas.
//! Embedded quotes and commas are written as they are, without escaping.

use crate::record::{CsvRow, COLUMNS};

const DELIMITER: &str = ",";
const ENCLOSURE: char = '"';

fn join_quoted<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    let mut line = fields
        .into_iter()
        .map(|field| format!("{}{}{}", ENCLOSURE, field, ENCLOSURE))
        .collect::<Vec<_>>()
        .join(DELIMITER);
    line.push('\n');
    line
}

/// The header line, newline-terminated.
pub fn header() -> String {
    join_quoted(COLUMNS)
}

/// Render one row, newline-terminated.
pub fn render_row(row: &CsvRow) -> String {
    let values = row.values();
    join_quoted(values.iter().map(String::as_str))
}
