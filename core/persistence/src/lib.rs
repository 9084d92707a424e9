//! FILENAME: core/persistence/src/lib.rs
//! Treemap Persistence Module
//!
//! Reads ticket exports from CSV and writes the debug CSV dumps and the
//! final HTML treemap.

mod error;
mod csv_reader;
mod csv_writer;
mod html_writer;

pub use error::PersistenceError;
pub use csv_reader::{load_csv, parse_csv, DELIMITER};
pub use csv_writer::write_table_csv;
pub use html_writer::{render_html, write_html};
