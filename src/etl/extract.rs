//! Extractor trait for reading a dataset from a source

use eyre::Result;

/// Extractor trait for extracting a dataset from a source
///
/// Implementors define how to read data from sources like:
/// - Delimited text files
/// - Databases
/// - In-memory fixtures
///
/// # Example
/// ```no_run
/// use retail_etl::etl::Extractor;
/// use retail_etl::table::Table;
/// use eyre::Result;
///
/// struct EmptySource;
///
/// impl Extractor for EmptySource {
///     type Output = Table;
///
///     fn extract(&self) -> Result<Self::Output> {
///         Ok(Table::new(vec!["id"]))
///     }
/// }
/// ```
pub trait Extractor {
    /// The extracted dataset
    type Output;

    /// Extract the full dataset from the source
    ///
    /// # Errors
    /// Returns an error if the source is absent or cannot be parsed. No
    /// partial dataset is ever returned.
    fn extract(&self) -> Result<Self::Output>;
}
