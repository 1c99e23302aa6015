//! Known retail fields and the schema capability check

use crate::table::Table;
use std::fmt;

/// A source column the cleaning rules know how to work with
///
/// Names are given in their normalized (lower snake case) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Category,
    ReviewRating,
    FrequencyOfPurchases,
    Age,
    PromoCodeUsed,
    TransactionDate,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Category,
        Field::ReviewRating,
        Field::FrequencyOfPurchases,
        Field::Age,
        Field::PromoCodeUsed,
        Field::TransactionDate,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::ReviewRating => "review_rating",
            Self::FrequencyOfPurchases => "frequency_of_purchases",
            Self::Age => "age",
            Self::PromoCodeUsed => "promo_code_used",
            Self::TransactionDate => "transaction_date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Which known fields a table carries
///
/// Built once from a table with normalized headers, then queried by each
/// rule's declared requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSchema {
    present: Vec<Field>,
}

impl RecordSchema {
    /// Inspect a table's header
    pub fn inspect(table: &Table) -> Self {
        let present = Field::ALL
            .into_iter()
            .filter(|field| table.has_column(field.column_name()))
            .collect();
        Self { present }
    }

    pub fn has(&self, field: Field) -> bool {
        self.present.contains(&field)
    }

    /// True when every field in `required` is present
    pub fn supports(&self, required: &[Field]) -> bool {
        required.iter().all(|f| self.has(*f))
    }

    /// Fields from `required` that are absent
    pub fn missing(&self, required: &[Field]) -> Vec<Field> {
        required
            .iter()
            .copied()
            .filter(|f| !self.has(*f))
            .collect()
    }

    pub fn fields(&self) -> &[Field] {
        &self.present
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect() {
        let table = Table::new(vec!["customer_id", "age", "category", "Review Rating"]);
        let schema = RecordSchema::inspect(&table);

        assert_eq!(schema.fields(), &[Field::Category, Field::Age]);
        assert!(schema.supports(&[Field::Age]));
        assert!(schema.supports(&[]));
        assert!(!schema.supports(&[Field::Category, Field::ReviewRating]));
        assert_eq!(
            schema.missing(&[Field::Category, Field::ReviewRating]),
            vec![Field::ReviewRating]
        );
    }
}
