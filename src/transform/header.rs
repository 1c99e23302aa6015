//! Column header normalization

use crate::etl::Transformer;
use crate::table::Table;
use eyre::Result;
use std::collections::HashSet;

/// Normalize a column name: lower case, spaces to underscores, no parentheses
///
/// # Example
/// ```
/// use retail_etl::transform::normalize_header;
///
/// assert_eq!(normalize_header("Purchase Amount (USD)"), "purchase_amount_usd");
/// assert_eq!(normalize_header("purchase_amount_usd"), "purchase_amount_usd");
/// ```
pub fn normalize_header(name: &str) -> String {
    name.to_lowercase().replace(' ', "_").replace(['(', ')'], "")
}

/// Transformer that normalizes every column name of a table
pub struct HeaderNormalizer;

impl Transformer for HeaderNormalizer {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        input.rename_columns(normalize_header);

        {
            let mut seen = HashSet::new();
            for column in input.columns() {
                if !seen.insert(column.as_str()) {
                    log::warn!("Duplicate column '{}' after header normalization", column);
                }
            }
        }

        log::debug!("Normalized headers: {:?}", input.columns());
        Ok(input)
    }
}
