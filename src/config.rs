//! Pipeline configuration

use std::path::PathBuf;

pub const DEFAULT_SOURCE: &str = "data/customer_shopping_behavior_raw.csv";
pub const DEFAULT_DATABASE: &str = "retail.db";
pub const DEFAULT_TABLE: &str = "retail_sales_clean";

/// Where the pipeline reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// CSV file to extract
    pub source: PathBuf,
    /// SQLite database file holding the sink table
    pub database: PathBuf,
    /// Sink table, replaced on every run
    pub table: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            database: PathBuf::from(DEFAULT_DATABASE),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - RETAIL_ETL_SOURCE: CSV file to read
    /// - RETAIL_ETL_DATABASE: SQLite database path
    /// - RETAIL_ETL_TABLE: Target table name
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            source: std::env::var("RETAIL_ETL_SOURCE")
                .map(PathBuf::from)
                .unwrap_or(defaults.source),
            database: std::env::var("RETAIL_ETL_DATABASE")
                .map(PathBuf::from)
                .unwrap_or(defaults.database),
            table: std::env::var("RETAIL_ETL_TABLE").unwrap_or(defaults.table),
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_database(mut self, database: impl Into<PathBuf>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}
