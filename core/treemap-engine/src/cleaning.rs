//! FILENAME: core/treemap-engine/src/cleaning.rs
//! Row Cleaner - normalizes hierarchy text and the value column per row.
//!
//! This is the only stage that changes row cardinality: a row whose value
//! is not a finite, strictly positive number is dropped outright.

use engine::number_format::{format_number, presets};
use engine::Table;
use serde::{Deserialize, Serialize};

use crate::definition::{HierarchyConfig, Levels, LEVEL_COUNT};
use crate::error::EngineError;

/// Characters stripped from the end of hierarchy values ("Billing/" -> "Billing").
pub const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// A row that survived cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    /// Index of the row in the source table.
    pub source_row: usize,
    pub levels: Levels,
    /// Always finite and > 0.
    pub value: f64,
}

/// Result of cleaning a whole table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningOutcome {
    pub records: Vec<CleanedRecord>,

    /// Rows removed because their value was invalid.
    pub dropped_rows: usize,

    /// Hierarchy columns that were not in the source and were read as absent.
    pub synthesized_columns: Vec<String>,
}

// ============================================================================
// SINGLE VALUES
// ============================================================================

/// Normalizes one hierarchy cell.
///
/// Trims whitespace, strips trailing path separators, and maps empty text
/// and the textual "not-a-number" markers to `None`. Cleaning a cleaned
/// value returns it unchanged.
pub fn clean_hierarchy_value(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let cleaned = raw
        .trim_start()
        .trim_end_matches(|c: char| c.is_whitespace() || PATH_SEPARATORS.contains(&c));

    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") || cleaned == "None" {
        return None;
    }
    Some(cleaned.to_string())
}

/// Parses one value cell into a strictly positive, finite number.
///
/// All whitespace is removed first, so "1 200" (space as thousands
/// separator, including no-break variants) parses as 1200.
pub fn clean_value(raw: Option<&str>) -> Option<f64> {
    let compact: String = raw?.chars().filter(|c| !c.is_whitespace()).collect();
    let value: f64 = compact.parse().ok()?;

    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

// ============================================================================
// TABLES
// ============================================================================

/// Adds every configured hierarchy column the table lacks, filled with
/// absent cells. Returns the names that were added, in level order.
pub fn synthesize_missing_levels(table: &mut Table, config: &HierarchyConfig) -> Vec<String> {
    let mut added = Vec::new();
    for name in &config.level_columns {
        if !table.has_column(name) {
            table.add_empty_column(name);
            added.push(name.clone());
        }
    }
    added
}

/// Cleans every row of `table`.
///
/// Missing hierarchy columns are read as absent (never an error); a
/// missing value column is.
pub fn clean_table(
    table: &Table,
    config: &HierarchyConfig,
    value_column: &str,
) -> Result<CleaningOutcome, EngineError> {
    let value_idx = table
        .column_index(value_column)
        .ok_or_else(|| EngineError::MissingValueColumn(value_column.to_string()))?;

    let level_idx: Vec<Option<usize>> = config
        .level_columns
        .iter()
        .map(|name| table.column_index(name))
        .collect();

    let synthesized_columns = config
        .level_columns
        .iter()
        .zip(&level_idx)
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name.clone())
        .collect();

    let mut records = Vec::with_capacity(table.row_count());
    let mut dropped_rows = 0;

    for row in 0..table.row_count() {
        let value = match clean_value(table.get(row, value_idx)) {
            Some(v) => v,
            None => {
                dropped_rows += 1;
                continue;
            }
        };

        let mut levels: Levels = Default::default();
        for (level, idx) in level_idx.iter().enumerate().take(LEVEL_COUNT) {
            levels[level] = idx.and_then(|col| clean_hierarchy_value(table.get(row, col)));
        }

        records.push(CleanedRecord {
            source_row: row,
            levels,
            value,
        });
    }

    Ok(CleaningOutcome {
        records,
        dropped_rows,
        synthesized_columns,
    })
}

impl CleaningOutcome {
    /// Rebuilds a table of the retained rows: all source columns, with the
    /// hierarchy and value cells replaced by their cleaned form.
    pub fn to_table(&self, source: &Table, config: &HierarchyConfig, value_column: &str) -> Table {
        let mut columns = source.columns.clone();
        for name in &config.level_columns {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }

        let mut table = Table::new(columns);
        let value_idx = table.column_index(value_column);
        let level_idx: Vec<Option<usize>> = config
            .level_columns
            .iter()
            .map(|name| table.column_index(name))
            .collect();

        for record in &self.records {
            let mut row = source.rows.get(record.source_row).cloned().unwrap_or_default();
            row.resize(table.column_count(), None);

            for (level, idx) in level_idx.iter().enumerate() {
                if let Some(col) = idx {
                    row[*col] = record.levels[level].clone();
                }
            }
            if let Some(col) = value_idx {
                row[col] = Some(format_number(record.value, &presets::general()));
            }
            table.push_row(row);
        }

        table
    }
}
