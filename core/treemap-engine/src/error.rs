//! FILENAME: core/treemap-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Cannot determine the value column. No column header like 'Total Tickets Q1' found in {columns:?}")]
    ValueColumnNotFound { columns: Vec<String> },

    #[error("Required value column '{0}' is missing from the CSV")]
    MissingValueColumn(String),

    #[error("No rows with a positive value remain after cleaning")]
    NoValidRows,
}
