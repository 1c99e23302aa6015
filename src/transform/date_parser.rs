//! Transaction date parsing

use super::{CleaningRule, Field};
use crate::etl::Transformer;
use crate::table::{Table, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use eyre::Result;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

/// Parse a date or date-time string
///
/// Month-first is assumed for slash-separated dates. Offsets in RFC 3339
/// strings are folded into UTC.
///
/// # Example
/// ```
/// use retail_etl::transform::parse_date;
///
/// let parsed = parse_date("2024-03-09").unwrap();
/// assert_eq!(parsed.to_string(), "2024-03-09 00:00:00");
/// assert!(parse_date("not a date").is_none());
/// ```
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Convert `transaction_date` text into date values
///
/// Cells that cannot be parsed become missing and are counted in a warning;
/// they never fail the run.
pub struct DateParser {
    fields: [Field; 1],
}

impl DateParser {
    pub fn new(field: Field) -> Self {
        Self { fields: [field] }
    }

    pub fn transaction_date() -> Self {
        Self::new(Field::TransactionDate)
    }
}

impl Transformer for DateParser {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let column = self.fields[0].column_name();
        let mut rejected = 0;

        let found = input.map_column(column, |value| match value {
            Value::Null => Value::Null,
            Value::Date(d) => Value::Date(*d),
            Value::Text(text) => match parse_date(text) {
                Some(d) => Value::Date(d),
                None => {
                    rejected += 1;
                    Value::Null
                }
            },
            _ => {
                rejected += 1;
                Value::Null
            }
        });

        if found && rejected > 0 {
            log::warn!(
                "{} '{}' values could not be parsed as dates and were set to missing",
                rejected,
                column
            );
        }
        Ok(input)
    }
}

impl CleaningRule for DateParser {
    fn name(&self) -> &'static str {
        "date parsing"
    }

    fn requires(&self) -> &[Field] {
        &self.fields
    }
}
