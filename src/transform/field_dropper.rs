//! Field dropper transformer
//!
//! Removes columns that carry no information beyond other columns.

use super::{CleaningRule, Field};
use crate::etl::Transformer;
use crate::table::Table;
use eyre::Result;

/// Transformer that drops specified fields from a table
///
/// This is used to remove redundant retail columns like:
/// - promo_code_used (duplicates discount_applied)
///
/// # Example
/// ```
/// use retail_etl::etl::Transformer;
/// use retail_etl::table::Table;
/// use retail_etl::transform::{Field, FieldDropper};
///
/// let dropper = FieldDropper::new(vec![Field::PromoCodeUsed]);
/// let input = Table::new(vec!["customer_id", "promo_code_used", "discount_applied"]);
///
/// let output = dropper.transform(input).unwrap();
/// assert_eq!(output.columns(), &["customer_id", "discount_applied"]);
/// ```
pub struct FieldDropper {
    fields: Vec<Field>,
}

impl FieldDropper {
    /// Create a new field dropper with the specified fields to remove
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Create a field dropper with the redundant retail fields
    ///
    /// Drops: promo_code_used
    pub fn redundant_retail_fields() -> Self {
        Self::new(vec![Field::PromoCodeUsed])
    }
}

impl Transformer for FieldDropper {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        for field in &self.fields {
            if input.drop_column(field.column_name()).is_some() {
                log::debug!("Dropped column '{}'", field);
            }
        }
        Ok(input)
    }
}

impl CleaningRule for FieldDropper {
    fn name(&self) -> &'static str {
        "redundant column drop"
    }

    fn requires(&self) -> &[Field] {
        &self.fields
    }
}
