//! Retail ETL
//!
//! Extracts a retail transactions CSV file, cleans it and derives features,
//! then replaces a SQL table with the result.

pub mod cli;
pub mod config;
pub mod etl;
pub mod storage;
pub mod table;
pub mod transform;

// Re-exports for convenience
pub use config::PipelineConfig;
pub use etl::{Extractor, Loader, Pipeline, RunOutcome, Transformer};
pub use storage::{CsvReader, NdjsonWriter, SqliteWriter};
pub use table::{Record, Table, Value};
pub use transform::RetailCleaner;
