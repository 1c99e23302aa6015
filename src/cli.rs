//! CLI helper functions

use crate::{
    config::PipelineConfig,
    etl::{Pipeline, RunOutcome},
    storage::{CsvReader, NdjsonWriter, SqliteWriter},
    transform::RetailCleaner,
};
use std::path::Path;

/// Clean the configured CSV file and replace the configured SQLite table
///
/// Pipeline: CsvReader → RetailCleaner → SqliteWriter
pub fn run_pipeline(config: &PipelineConfig) -> RunOutcome {
    let pipeline = Pipeline::new(
        CsvReader::new(&config.source),
        RetailCleaner::new(),
        SqliteWriter::new(&config.database, config.table.as_str()),
    );
    pipeline.run()
}

/// Clean the configured CSV file and write the result as NDJSON instead of
/// touching the database
///
/// Pipeline: CsvReader → RetailCleaner → NdjsonWriter
pub fn run_preview(config: &PipelineConfig, output: impl AsRef<Path>) -> RunOutcome {
    let output = output.as_ref();
    log::info!("Previewing cleaned data to {}", output.display());

    let pipeline = Pipeline::new(
        CsvReader::new(&config.source),
        RetailCleaner::new(),
        NdjsonWriter::new(output),
    );
    pipeline.run()
}
