//! FILENAME: core/persistence/src/error.rs

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Input CSV file not found at {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Input CSV file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
