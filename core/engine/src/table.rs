//! FILENAME: core/engine/src/table.rs
//! PURPOSE: Holds a loaded tabular dataset (header + text rows).
//! CONTEXT: This is the working table every pipeline stage reads from.
//! Cells are kept as text; an empty source field is stored as `None` so
//! that "absent" stays distinguishable from any real value.

use serde::{Deserialize, Serialize};

/// A single cell: raw text, or `None` when the source field was empty.
pub type CellText = Option<String>;

/// The Table struct holds a header row and a dense list of data rows.
/// Every row always has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column names in declared order.
    pub columns: Vec<String>,

    /// Row-major cell storage.
    pub rows: Vec<Vec<CellText>>,
}

impl Table {
    /// Creates a new, empty Table with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row. Short rows are padded with absent cells, long rows
    /// are truncated to the header width.
    pub fn push_row(&mut self, mut row: Vec<CellText>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Position of the first column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Appends a column whose cells are absent for every existing row.
    /// Returns the index of the new column.
    pub fn add_empty_column(&mut self, name: &str) -> usize {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(None);
        }
        self.columns.len() - 1
    }

    /// Retrieves the text of a cell. Returns None for absent cells and
    /// out-of-range coordinates alike.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// A table with no data rows is empty, even if it has a header.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["Level 1".to_string(), "Tickets".to_string()]);
        table.push_row(vec![Some("Tech".to_string()), Some("10".to_string())]);
        table.push_row(vec![Some("Billing".to_string())]);
        table
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let table = sample();
        assert_eq!(table.rows[1].len(), 2);
        assert_eq!(table.get(1, 1), None);
    }

    #[test]
    fn test_push_row_truncates_long_rows() {
        let mut table = Table::new(vec!["A".to_string()]);
        table.push_row(vec![Some("x".to_string()), Some("y".to_string())]);
        assert_eq!(table.rows[0], vec![Some("x".to_string())]);
    }

    #[test]
    fn test_add_empty_column() {
        let mut table = sample();
        let idx = table.add_empty_column("Level 2");
        assert_eq!(idx, 2);
        assert!(table.has_column("Level 2"));
        assert_eq!(table.get(0, idx), None);
        assert_eq!(table.get(1, idx), None);
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let table = Table::new(vec!["Level 1".to_string()]);
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn test_serializes_absent_cells_as_null() {
        let table = sample();
        let json = serde_json::to_string(&table.rows[1]).unwrap();
        assert_eq!(json, r#"["Billing",null]"#);
    }
}
