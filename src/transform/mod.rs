//! Cleaning and feature rules for retail transaction tables
//!
//! Each rule is a [`Transformer`] over a whole [`Table`](crate::table::Table)
//! that declares the fields it needs. [`RetailCleaner`] chains them in their
//! fixed order.

mod age_group;
mod cleaner;
mod date_parser;
mod field_dropper;
mod frequency;
mod header;
mod median_imputer;
mod schema;

pub use age_group::{AGE_GROUP_COLUMN, AgeBinner, AgeGroup, quartile_edges};
pub use cleaner::RetailCleaner;
pub use date_parser::{DateParser, parse_date};
pub use field_dropper::FieldDropper;
pub use frequency::{
    FREQUENCY_DAYS_COLUMN, FrequencyCanonicalizer, FrequencyDays, canonical_frequency,
    frequency_days,
};
pub use header::{HeaderNormalizer, normalize_header};
pub use median_imputer::{MedianImputer, median};
pub use schema::{Field, RecordSchema};

use crate::etl::Transformer;
use crate::table::Table;

/// A table transformer that only applies when its fields are present
pub trait CleaningRule: Transformer<Input = Table, Output = Table> {
    /// Short human-readable name used in logs
    fn name(&self) -> &'static str;

    /// Fields that must all be present for the rule to run
    fn requires(&self) -> &[Field];
}
