//! FILENAME: core/persistence/src/csv_writer.rs
//! Writes tables as `;`-delimited CSV (the debug dumps).

use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use engine::Table;

use crate::csv_reader::DELIMITER;
use crate::PersistenceError;

/// Writes `table` to `path`, creating parent directories as needed.
/// Absent cells are written as empty fields.
pub fn write_table_csv(table: &Table, path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = WriterBuilder::new().delimiter(DELIMITER).from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}
