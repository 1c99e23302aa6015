//! Purchase frequency canonicalization and the derived day count

use super::{CleaningRule, Field};
use crate::etl::Transformer;
use crate::table::{Table, Value};
use eyre::Result;

/// Column holding the day count derived from the purchase frequency
pub const FREQUENCY_DAYS_COLUMN: &str = "frequency_days";

/// Legacy spellings and their canonical label
const LEGACY_LABELS: [(&str, &str); 2] = [
    ("Bi-Weekly", "Fortnightly"),
    ("Every 3 Months", "Quarterly"),
];

const DAYS_PER_LABEL: [(&str, i64); 5] = [
    ("Fortnightly", 14),
    ("Weekly", 7),
    ("Monthly", 30),
    ("Quarterly", 90),
    ("Annually", 365),
];

/// Canonical spelling of a frequency label; unknown labels pass through
pub fn canonical_frequency(label: &str) -> &str {
    LEGACY_LABELS
        .iter()
        .find(|(legacy, _)| *legacy == label)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(label)
}

/// Days between purchases for a canonical label
pub fn frequency_days(label: &str) -> Option<i64> {
    DAYS_PER_LABEL
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, days)| *days)
}

/// Rewrite legacy frequency labels to their canonical spelling
pub struct FrequencyCanonicalizer;

impl Transformer for FrequencyCanonicalizer {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let mut rewritten = 0;
        let found = input.map_column(Field::FrequencyOfPurchases.column_name(), |value| {
            match value {
                Value::Text(label) => {
                    let canonical = canonical_frequency(label);
                    if canonical != label {
                        rewritten += 1;
                    }
                    Value::text(canonical)
                }
                other => other.clone(),
            }
        });

        if found {
            log::debug!("Canonicalized {} frequency labels", rewritten);
        }
        Ok(input)
    }
}

impl CleaningRule for FrequencyCanonicalizer {
    fn name(&self) -> &'static str {
        "frequency canonicalization"
    }

    fn requires(&self) -> &[Field] {
        &[Field::FrequencyOfPurchases]
    }
}

/// Derive `frequency_days` from the canonical purchase frequency
///
/// Labels outside the known set get a missing day count.
pub struct FrequencyDays;

impl Transformer for FrequencyDays {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let column = Field::FrequencyOfPurchases.column_name();
        if !input.has_column(column) {
            return Ok(input);
        }

        let days: Vec<Value> = input
            .column(column)
            .unwrap_or_default()
            .into_iter()
            .map(|label| Value::from(label.as_str().and_then(frequency_days)))
            .collect();

        let unknown = days.iter().filter(|d| d.is_null()).count();
        if unknown > 0 {
            log::debug!("{} rows have no known purchase frequency", unknown);
        }

        input.set_column(FREQUENCY_DAYS_COLUMN, days)?;
        Ok(input)
    }
}

impl CleaningRule for FrequencyDays {
    fn name(&self) -> &'static str {
        "frequency days"
    }

    fn requires(&self) -> &[Field] {
        &[Field::FrequencyOfPurchases]
    }
}
