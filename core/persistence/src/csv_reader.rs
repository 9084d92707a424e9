//! FILENAME: core/persistence/src/csv_reader.rs
//! Reads `;`-delimited, `"`-quoted ticket exports into a Table.

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use engine::Table;

use crate::PersistenceError;

pub const DELIMITER: u8 = b';';
const QUOTE: char = '"';

/// Drops spaces and tabs that directly follow a delimiter outside quotes,
/// so `a; "b;c"` reads as two fields with the second one quoted.
///
/// Only a quote that opens a field starts a quoted section. A stray quote
/// inside an unquoted field (`5" screen`) is plain text.
fn skip_initial_space(text: &str) -> String {
    let delimiter = DELIMITER as char;
    let mut out = String::with_capacity(text.len());
    let mut in_quotes = false;
    let mut field_start = true;
    let mut just_closed = false;
    let mut after_delimiter = false;

    for c in text.chars() {
        if after_delimiter && (c == ' ' || c == '\t') {
            continue;
        }
        after_delimiter = false;
        let reopen = just_closed;
        just_closed = false;

        if in_quotes {
            if c == QUOTE {
                in_quotes = false;
                just_closed = true;
            }
        } else if c == QUOTE && (field_start || reopen) {
            // `""` inside a quoted field is an escaped quote.
            in_quotes = true;
            field_start = false;
        } else if c == delimiter {
            after_delimiter = true;
            field_start = true;
        } else if c == '\n' || c == '\r' {
            field_start = true;
        } else {
            field_start = false;
        }
        out.push(c);
    }
    out
}

/// Parses CSV text. Header names are trimmed; empty fields become absent
/// cells; rows shorter or longer than the header are padded or cut.
pub fn parse_csv(text: &str) -> Result<Table, PersistenceError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let prepared = skip_initial_space(text);

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .quote(QUOTE as u8)
        .flexible(true)
        .has_headers(true)
        .from_reader(prepared.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mut table = Table::new(columns);

    for result in reader.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|field| if field.is_empty() { None } else { Some(field.to_string()) })
            .collect();
        table.push_row(row);
    }

    Ok(table)
}

/// Loads the export at `path`.
///
/// A missing file and a file without data (zero bytes, no header, or a
/// header with no rows) are reported as distinct errors.
pub fn load_csv(path: &Path) -> Result<Table, PersistenceError> {
    if !path.is_file() {
        return Err(PersistenceError::FileNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    if text.trim_start_matches('\u{feff}').trim().is_empty() {
        return Err(PersistenceError::EmptyFile(path.to_path_buf()));
    }

    let table = parse_csv(&text)?;
    if table.columns.is_empty() || table.is_empty() {
        return Err(PersistenceError::EmptyFile(path.to_path_buf()));
    }
    Ok(table)
}
