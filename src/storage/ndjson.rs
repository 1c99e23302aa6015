//! NDJSON (Newline Delimited JSON) export

use crate::etl::Loader;
use crate::table::Table;

use eyre::{Context, Result};
use std::path::Path;

/// Write a [`Table`] as NDJSON, one object per row
///
/// Keys follow column order. Used to preview a cleaned dataset without
/// touching the database.
pub struct NdjsonWriter {
    path: std::path::PathBuf,
}

impl NdjsonWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write every row, replacing the file
    pub fn write(&self, table: &Table) -> Result<usize> {
        let ndjson = table
            .records()
            .map(|record| serde_json::to_string(&record))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");

        // Add trailing newline
        let content = if ndjson.is_empty() {
            String::new()
        } else {
            format!("{}\n", ndjson)
        };

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write NDJSON file: {}", self.path.display()))?;

        log::info!(
            "[SUCCESS] Wrote {} rows to {}",
            table.len(),
            self.path.display()
        );
        Ok(table.len())
    }
}

impl Loader for NdjsonWriter {
    type Input = Table;

    fn load(&self, input: Self::Input) -> Result<usize> {
        self.write(&input)
    }

    fn target(&self) -> Option<String> {
        Some(format!("file '{}'", self.path.display()))
    }
}
