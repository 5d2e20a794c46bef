//! # folderwalk-export
//!
//! Writes the folder and session datasets as CSV files.

mod csv_export;

pub use csv_export::{CsvExporter, DEFAULT_FOLDERS_FILE, DEFAULT_SESSIONS_FILE};
