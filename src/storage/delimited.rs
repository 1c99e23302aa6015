//! Delimited text (CSV) source

use crate::etl::Extractor;
use crate::table::{Table, Value};

use eyre::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// Cell spellings read as missing values, the same set pandas uses by default
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Storage type inferred for a whole CSV column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    /// Narrowest kind able to hold every non-missing cell
    fn infer<'a>(cells: impl Iterator<Item = &'a str>) -> Self {
        let mut kind = None;
        for cell in cells.filter(|c| !is_null(c)) {
            let cell = cell.trim();
            let cell_kind = if cell.parse::<i64>().is_ok() {
                Self::Int
            } else if cell.parse::<f64>().is_ok() {
                Self::Float
            } else if parse_bool(cell).is_some() {
                Self::Bool
            } else {
                return Self::Text;
            };

            kind = Some(match (kind, cell_kind) {
                (None, k) => k,
                (Some(a), b) if a == b => a,
                (Some(Self::Int), Self::Float) | (Some(Self::Float), Self::Int) => Self::Float,
                _ => return Self::Text,
            });
        }
        kind.unwrap_or(Self::Text)
    }

    fn convert(self, cell: &str) -> Value {
        if is_null(cell) {
            return Value::Null;
        }
        let trimmed = cell.trim();
        match self {
            Self::Int => trimmed.parse().map(Value::Int).unwrap_or(Value::Null),
            Self::Float => trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| !f.is_nan())
                .map(Value::Float)
                .unwrap_or(Value::Null),
            Self::Bool => parse_bool(trimmed).map(Value::Bool).unwrap_or(Value::Null),
            Self::Text => Value::text(cell),
        }
    }
}

fn is_null(cell: &str) -> bool {
    NULL_MARKERS.contains(&cell.trim())
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Read a CSV file with a header row into a [`Table`]
///
/// Column order and row order are kept exactly as in the file. Each column
/// gets one storage type, inferred from all of its non-missing cells.
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    /// Use a delimiter other than `,`
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read and type the whole file
    ///
    /// # Errors
    /// Returns an error if the file does not exist, has no header, has rows of
    /// unequal length or is not valid UTF-8.
    pub fn read(&self) -> Result<Table> {
        log::info!("Source: {}", self.path.display());

        if !self.path.exists() {
            bail!("Source file not found: {}", self.path.display());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open CSV file: {}", self.path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header: {}", self.path.display()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(String::is_empty) {
            bail!("CSV file has no header row: {}", self.path.display());
        }

        let mut records = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = result.with_context(|| {
                format!(
                    "Failed to parse CSV record {} in {}",
                    line + 1,
                    self.path.display()
                )
            })?;
            records.push(record);
        }

        let kinds: Vec<ColumnKind> = (0..headers.len())
            .map(|idx| ColumnKind::infer(records.iter().map(|r| &r[idx])))
            .collect();
        log::debug!("Inferred column kinds: {:?}", kinds);

        let mut table = Table::new(headers);
        for record in &records {
            let row = record
                .iter()
                .zip(&kinds)
                .map(|(cell, kind)| kind.convert(cell))
                .collect();
            table.push_row(row)?;
        }

        log::info!("[SUCCESS] Loaded {} rows", table.len());
        Ok(table)
    }
}

impl Extractor for CsvReader {
    type Output = Table;

    fn extract(&self) -> Result<Self::Output> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_preserves_order_and_types() {
        let file = write_csv(
            "Customer ID,Age,Category,Review Rating,Promo Code Used\n\
             1,55,Clothing,3.1,Yes\n\
             2,19,Footwear,,No\n\
             3,50,Clothing,4,Yes\n",
        );

        let table = CsvReader::new(file.path()).read().unwrap();

        assert_eq!(
            table.columns(),
            &["Customer ID", "Age", "Category", "Review Rating", "Promo Code Used"]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.value(0, "Customer ID"), Some(&Value::Int(1)));
        assert_eq!(table.value(1, "Age"), Some(&Value::Int(19)));
        assert_eq!(table.value(1, "Category"), Some(&Value::text("Footwear")));
        assert_eq!(table.value(0, "Review Rating"), Some(&Value::Float(3.1)));
        assert_eq!(table.value(1, "Review Rating"), Some(&Value::Null));
        assert_eq!(table.value(2, "Review Rating"), Some(&Value::Float(4.0)));
        assert_eq!(table.value(2, "Promo Code Used"), Some(&Value::text("Yes")));
    }

    #[test]
    fn test_bool_and_null_markers() {
        let file = write_csv("flag,note\nTrue,NA\nfalse,hello\n,N/A\n");

        let table = CsvReader::new(file.path()).read().unwrap();

        assert_eq!(table.value(0, "flag"), Some(&Value::Bool(true)));
        assert_eq!(table.value(1, "flag"), Some(&Value::Bool(false)));
        assert_eq!(table.value(2, "flag"), Some(&Value::Null));
        assert_eq!(table.value(0, "note"), Some(&Value::Null));
        assert_eq!(table.value(1, "note"), Some(&Value::text("hello")));
    }

    #[test]
    fn test_nan_spellings_are_missing() {
        let file = write_csv(
            "rating,age\n\
             3,55\n\
             -nan,-NaN\n\
             NAN,1.#QNAN\n\
             #N/A N/A,#NA\n\
             5,-1.#IND\n\
             inf,40\n",
        );

        let table = CsvReader::new(file.path()).read().unwrap();

        let ratings: Vec<&Value> = table.column("rating").unwrap();
        assert_eq!(
            ratings,
            vec![
                &Value::Float(3.0),
                &Value::Null,
                &Value::Null,
                &Value::Null,
                &Value::Float(5.0),
                &Value::Float(f64::INFINITY),
            ]
        );
        assert_eq!(table.value(0, "age"), Some(&Value::Int(55)));
        for row in 1..5 {
            assert_eq!(table.value(row, "age"), Some(&Value::Null));
        }
        assert_eq!(table.value(5, "age"), Some(&Value::Int(40)));
    }

    #[test]
    fn test_mixed_column_stays_text() {
        let file = write_csv("code\n12\nA7\n");

        let table = CsvReader::new(file.path()).read().unwrap();

        assert_eq!(table.value(0, "code"), Some(&Value::text("12")));
    }

    #[test]
    fn test_missing_file() {
        let err = CsvReader::new("/definitely/not/here.csv").read().unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_ragged_rows_fail() {
        let file = write_csv("a,b\n1,2\n3\n");
        assert!(CsvReader::new(file.path()).read().is_err());
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"name\n\xff\xfe\n").unwrap();
        assert!(CsvReader::new(file.path()).read().is_err());
    }

    #[test]
    fn test_semicolon_delimiter() {
        let file = write_csv("a;b\n1;x\n");
        let table = CsvReader::new(file.path())
            .with_delimiter(b';')
            .read()
            .unwrap();
        assert_eq!(table.columns(), &["a", "b"]);
        assert_eq!(table.value(0, "b"), Some(&Value::text("x")));
    }
}
