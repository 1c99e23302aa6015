//! Loader trait for writing a dataset to a destination

use eyre::Result;

/// Loader trait for loading a dataset to a destination
///
/// Implementors define how to persist data to destinations:
/// - Relational tables
/// - NDJSON files
///
/// # Example
/// ```no_run
/// use retail_etl::etl::Loader;
/// use retail_etl::table::Table;
/// use eyre::Result;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     type Input = Table;
///
///     fn load(&self, input: Self::Input) -> Result<usize> {
///         Ok(input.len())
///     }
/// }
/// ```
pub trait Loader {
    /// The dataset type accepted by this loader
    type Input;

    /// Load the dataset to the destination
    ///
    /// Returns the number of rows written
    ///
    /// # Errors
    /// Returns an error if loading fails (connection, I/O, constraint, etc.)
    fn load(&self, input: Self::Input) -> Result<usize>;

    /// Where the data goes, for progress logs (e.g. `table 'sales'`)
    fn target(&self) -> Option<String> {
        None
    }
}
