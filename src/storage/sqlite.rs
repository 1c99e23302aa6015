//! SQLite table sink

use crate::etl::Loader;
use crate::table::{DATE_FORMAT, Table, Value};

use eyre::{Context, Result, bail};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{Connection, params_from_iter};
use std::path::{Path, PathBuf};

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Int(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            Value::Float(f) if f.is_finite() => ToSqlOutput::Borrowed(ValueRef::Real(*f)),
            Value::Float(_) => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Bool(b) => ToSqlOutput::Borrowed(ValueRef::Integer(i64::from(*b))),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Date(d) => ToSqlOutput::Owned(SqlValue::Text(d.format(DATE_FORMAT).to_string())),
        })
    }
}

/// Declared SQL type of a column, inferred from its in-memory cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SqlType {
    Integer,
    Real,
    Text,
    Timestamp,
}

impl SqlType {
    fn infer<'a>(cells: impl Iterator<Item = &'a Value>) -> Self {
        let mut sql_type = None;
        for cell in cells {
            let cell_type = match cell {
                Value::Null => continue,
                Value::Int(_) | Value::Bool(_) => Self::Integer,
                Value::Float(_) => Self::Real,
                Value::Date(_) => Self::Timestamp,
                Value::Text(_) => return Self::Text,
            };
            sql_type = Some(match (sql_type, cell_type) {
                (None, t) => t,
                (Some(a), b) if a == b => a,
                (Some(Self::Integer), Self::Real) | (Some(Self::Real), Self::Integer) => Self::Real,
                _ => return Self::Text,
            });
        }
        sql_type.unwrap_or(Self::Text)
    }

    fn as_sql(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
            Self::Timestamp => "TIMESTAMP",
        }
    }
}

/// Quote an identifier for use in SQL text
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Write a [`Table`] into a SQLite table, replacing any previous table of
/// the same name
///
/// The previous table is dropped and a new one is created from the
/// in-memory column types, so earlier schema, indexes and constraints are
/// not kept. Drop, create and insert run in one transaction.
pub struct SqliteWriter {
    database: PathBuf,
    table: String,
}

impl SqliteWriter {
    pub fn new(database: impl AsRef<Path>, table: impl Into<String>) -> Self {
        Self {
            database: database.as_ref().to_path_buf(),
            table: table.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Replace the target table with the contents of `data`
    pub fn write(&self, data: &Table) -> Result<usize> {
        if data.width() == 0 {
            bail!("Cannot create table '{}' without columns", self.table);
        }

        log::info!(
            "Writing {} rows into table '{}' at {}",
            data.len(),
            self.table,
            self.database.display()
        );

        let mut conn = Connection::open(&self.database).with_context(|| {
            format!("Failed to open SQLite database: {}", self.database.display())
        })?;
        let tx = conn.transaction()?;

        let table = quote_ident(&self.table);
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {};", table))
            .with_context(|| format!("Failed to drop table '{}'", self.table))?;

        let definitions = data
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let sql_type = SqlType::infer(data.rows().iter().map(|r| &r[idx]));
                format!("{} {}", quote_ident(name), sql_type.as_sql())
            })
            .collect::<Vec<_>>()
            .join(", ");
        let create = format!("CREATE TABLE {} ({});", table, definitions);
        log::debug!("{}", create);
        tx.execute_batch(&create)
            .with_context(|| format!("Failed to create table '{}'", self.table))?;

        let columns = data
            .columns()
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; data.width()].join(", ");
        let insert = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table, columns, placeholders
        );

        {
            let mut stmt = tx.prepare(&insert)?;
            for (idx, row) in data.rows().iter().enumerate() {
                stmt.execute(params_from_iter(row.iter()))
                    .with_context(|| format!("Failed to insert row {}", idx + 1))?;
            }
        }

        tx.commit()
            .with_context(|| format!("Failed to commit table '{}'", self.table))?;

        log::info!("[SUCCESS] Data loaded into table '{}'", self.table);
        Ok(data.len())
    }
}

impl Loader for SqliteWriter {
    type Input = Table;

    fn load(&self, input: Self::Input) -> Result<usize> {
        self.write(&input)
    }

    fn target(&self) -> Option<String> {
        Some(format!("table '{}'", self.table_name()))
    }
}
