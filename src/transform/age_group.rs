//! Quartile age grouping

use super::{CleaningRule, Field};
use crate::etl::Transformer;
use crate::table::{Table, Value};
use eyre::{Result, bail};
use std::fmt;

/// Column holding the derived age group label
pub const AGE_GROUP_COLUMN: &str = "age_group";

/// Four ordered age bands, youngest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::YoungAdult,
        AgeGroup::Adult,
        AgeGroup::MiddleAged,
        AgeGroup::Senior,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::YoungAdult => "Young Adult",
            Self::Adult => "Adult",
            Self::MiddleAged => "Middle-aged",
            Self::Senior => "Senior",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quantile of sorted `values`, interpolating linearly between neighbours
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Bin edges at the 0, .25, .5, .75 and 1 quantiles of `values`
///
/// Returns `None` when `values` is empty.
pub fn quartile_edges(values: &[f64]) -> Option<[f64; 5]> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some([0.0, 0.25, 0.5, 0.75, 1.0].map(|q| quantile(&sorted, q)))
}

/// Band of `age` given quartile edges; the first band includes its lower edge
fn assign(age: f64, edges: &[f64; 5]) -> AgeGroup {
    if age <= edges[1] {
        AgeGroup::YoungAdult
    } else if age <= edges[2] {
        AgeGroup::Adult
    } else if age <= edges[3] {
        AgeGroup::MiddleAged
    } else {
        AgeGroup::Senior
    }
}

/// Derive `age_group` by splitting `age` into four equal-population bands
///
/// Edges come from this dataset's own age quartiles, so the same age can land
/// in different bands on different runs. Rows with a missing age get a
/// missing group. Fails when the quartile edges are not strictly increasing,
/// since four distinct bands cannot be formed.
pub struct AgeBinner;

impl Transformer for AgeBinner {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let column = Field::Age.column_name();
        if !input.has_column(column) {
            return Ok(input);
        }
        let ages: Vec<Option<f64>> = input
            .column(column)
            .unwrap_or_default()
            .into_iter()
            .map(Value::as_f64)
            .collect();
        let known: Vec<f64> = ages.iter().flatten().copied().collect();

        let groups: Vec<Value> = match quartile_edges(&known) {
            Some(edges) => {
                if edges.windows(2).any(|w| w[0] >= w[1]) {
                    bail!(
                        "Age quartile edges are not unique ({:?}); cannot form four age groups",
                        edges
                    );
                }
                log::debug!("Age group edges: {:?}", edges);
                ages.iter()
                    .map(|age| match age {
                        Some(age) => Value::text(assign(*age, &edges).label()),
                        None => Value::Null,
                    })
                    .collect()
            }
            None => {
                log::warn!("No numeric ages found; every age group is missing");
                vec![Value::Null; ages.len()]
            }
        };

        input.set_column(AGE_GROUP_COLUMN, groups)?;
        Ok(input)
    }
}

impl CleaningRule for AgeBinner {
    fn name(&self) -> &'static str {
        "age grouping"
    }

    fn requires(&self) -> &[Field] {
        &[Field::Age]
    }
}
