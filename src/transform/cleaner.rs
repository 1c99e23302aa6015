//! The retail cleaning sequence

use super::{
    AgeBinner, CleaningRule, DateParser, FieldDropper, FrequencyCanonicalizer, FrequencyDays,
    HeaderNormalizer, MedianImputer, RecordSchema,
};
use crate::etl::Transformer;
use crate::table::Table;
use eyre::{Context, Result};

/// Transformer running the full retail cleaning sequence
///
/// Headers are normalized first, then the table's schema is inspected once
/// and each rule runs in order only if every field it requires is present:
///
/// 1. Review rating median imputation per category
/// 2. Purchase frequency canonicalization
/// 3. `frequency_days` derivation
/// 4. `age_group` quartile derivation
/// 5. `promo_code_used` removal
/// 6. `transaction_date` parsing
///
/// No rule reorders rows.
pub struct RetailCleaner {
    rules: Vec<Box<dyn CleaningRule>>,
}

impl RetailCleaner {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(MedianImputer::review_rating_by_category()),
                Box::new(FrequencyCanonicalizer),
                Box::new(FrequencyDays),
                Box::new(AgeBinner),
                Box::new(FieldDropper::redundant_retail_fields()),
                Box::new(DateParser::transaction_date()),
            ],
        }
    }

    /// Names of the rules, in the order they run
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for RetailCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for RetailCleaner {
    type Input = Table;
    type Output = Table;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let mut table = HeaderNormalizer.transform(input)?;
        let schema = RecordSchema::inspect(&table);
        log::debug!("Recognized fields: {:?}", schema.fields());

        for rule in &self.rules {
            let required = rule.requires();
            if !schema.supports(required) {
                log::debug!(
                    "Skipping {}: missing {:?}",
                    rule.name(),
                    schema.missing(required)
                );
                continue;
            }

            log::debug!("Applying {}", rule.name());
            table = rule
                .transform(table)
                .with_context(|| format!("Cleaning rule '{}' failed", rule.name()))?;
        }

        log::info!("[SUCCESS] Data cleaned and features created");
        Ok(table)
    }
}
