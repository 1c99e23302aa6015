//! Sources and sinks for record tables
//!
//! This module handles all file and database I/O:
//! - CSV file reading
//! - SQLite table replacement
//! - NDJSON preview export

mod delimited;
mod ndjson;
mod sqlite;

pub use delimited::CsvReader;
pub use ndjson::NdjsonWriter;
pub use sqlite::SqliteWriter;
