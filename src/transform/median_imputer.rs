//! Grouped median imputation

use super::{CleaningRule, Field};
use crate::etl::Transformer;
use crate::table::{Table, Value};
use eyre::Result;
use std::collections::HashMap;

/// Median of `values`, averaging the two middle values for even counts
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Fill missing values of one column with the median of its group
///
/// Rows are grouped by the text of the group column. Each group's median is
/// taken over its non-missing numeric values, and every missing value in the
/// group is replaced by it. Groups with no values at all have no median and
/// their rows stay missing, as do rows whose group key is itself missing.
/// Numeric values in the target column come out as floats.
///
/// # Example
/// ```
/// use retail_etl::etl::Transformer;
/// use retail_etl::table::{Table, Value};
/// use retail_etl::transform::MedianImputer;
///
/// let table = Table::from_rows(
///     vec!["category", "review_rating"],
///     vec![
///         vec![Value::text("Outerwear"), Value::Int(3)],
///         vec![Value::text("Outerwear"), Value::Null],
///         vec![Value::text("Outerwear"), Value::Int(5)],
///     ],
/// )
/// .unwrap();
///
/// let output = MedianImputer::review_rating_by_category()
///     .transform(table)
///     .unwrap();
/// assert_eq!(output.value(1, "review_rating"), Some(&Value::Float(4.0)));
/// ```
pub struct MedianImputer {
    fields: [Field; 2],
}

impl MedianImputer {
    pub fn new(group: Field, target: Field) -> Self {
        Self {
            fields: [group, target],
        }
    }

    /// Impute `review_rating` per `category`
    pub fn review_rating_by_category() -> Self {
        Self::new(Field::Category, Field::ReviewRating)
    }

    fn group(&self) -> Field {
        self.fields[0]
    }

    fn target(&self) -> Field {
        self.fields[1]
    }

    fn group_key(value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl Transformer for MedianImputer {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let group_col = self.group().column_name();
        let target_col = self.target().column_name();

        if !input.has_column(group_col) || !input.has_column(target_col) {
            log::debug!(
                "Skipping median imputation, '{}' or '{}' is absent",
                group_col,
                target_col
            );
            return Ok(input);
        }
        let groups = input.column(group_col).unwrap_or_default();
        let targets = input.column(target_col).unwrap_or_default();

        let keys: Vec<Option<String>> = groups.into_iter().map(Self::group_key).collect();

        let mut samples: HashMap<&str, Vec<f64>> = HashMap::new();
        for (key, value) in keys.iter().zip(&targets) {
            if let (Some(key), Some(x)) = (key, value.as_f64()) {
                samples.entry(key.as_str()).or_default().push(x);
            }
        }
        let medians: HashMap<&str, f64> = samples
            .into_iter()
            .filter_map(|(key, mut values)| median(&mut values).map(|m| (key, m)))
            .collect();

        let mut imputed = 0;
        let mut no_median = 0;
        let mut no_group = 0;
        let values: Vec<Value> = keys
            .iter()
            .zip(targets.iter().copied())
            .map(|(key, value)| match value {
                value if value.is_missing() => match key {
                    None => {
                        no_group += 1;
                        Value::Null
                    }
                    Some(key) => match medians.get(key.as_str()) {
                        Some(m) => {
                            imputed += 1;
                            Value::Float(*m)
                        }
                        None => {
                            no_median += 1;
                            Value::Null
                        }
                    },
                },
                other => other.as_f64().map(Value::Float).unwrap_or_else(|| other.clone()),
            })
            .collect();

        input.set_column(target_col, values)?;

        log::debug!(
            "Imputed {} missing '{}' values from {} '{}' medians",
            imputed,
            target_col,
            medians.len(),
            group_col
        );
        if no_median > 0 {
            log::warn!(
                "{} rows left without '{}': their '{}' group has no values",
                no_median,
                target_col,
                group_col
            );
        }
        if no_group > 0 {
            log::warn!(
                "{} rows left without '{}': '{}' is missing",
                no_group,
                target_col,
                group_col
            );
        }

        Ok(input)
    }
}

impl CleaningRule for MedianImputer {
    fn name(&self) -> &'static str {
        "median imputation"
    }

    fn requires(&self) -> &[Field] {
        &self.fields
    }
}
