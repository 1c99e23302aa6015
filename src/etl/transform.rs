//! Transformer trait for data transformation

use eyre::Result;

/// Transformer trait for transforming a dataset
///
/// Implementors define how to reshape data:
/// - Data cleaning (imputing, canonicalizing values)
/// - Data enrichment (adding derived columns)
/// - Type coercion
///
/// # Example
/// ```
/// use retail_etl::etl::Transformer;
/// use retail_etl::table::Table;
/// use eyre::Result;
///
/// struct ColumnDropper {
///     column: String,
/// }
///
/// impl Transformer for ColumnDropper {
///     type Input = Table;
///     type Output = Table;
///
///     fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
///         input.drop_column(&self.column);
///         Ok(input)
///     }
/// }
///
/// let dropper = ColumnDropper { column: "b".to_string() };
/// let output = dropper.transform(Table::new(vec!["a", "b"])).unwrap();
/// assert_eq!(output.columns(), &["a"]);
/// ```
pub trait Transformer {
    /// Input dataset type
    type Input;

    /// Output dataset type after transformation
    type Output;

    /// Transform the dataset, taking ownership of it
    ///
    /// # Errors
    /// Returns an error if transformation fails (conversion, degenerate data, etc.)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;
}
