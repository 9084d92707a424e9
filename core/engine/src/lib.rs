//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the shared data engine.
//! CONTEXT: Re-exports the tabular data model and number formatting used by
//! the treemap engine, persistence and the app.

pub mod number_format;
pub mod table;

// Re-export commonly used types at the crate root
pub use number_format::{add_thousands_separator, format_decimal, format_number, format_share, NumberFormat};
pub use table::{CellText, Table};
