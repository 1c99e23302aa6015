//! Integration tests for the retail ETL pipeline
//!
//! These tests run the whole extract, clean and load sequence against real
//! CSV files and SQLite databases in temporary directories.

use eyre::Result;
use retail_etl::cli::{run_pipeline, run_preview};
use retail_etl::etl::{Extractor, Loader, Pipeline, RunOutcome, Transformer};
use retail_etl::storage::{CsvReader, SqliteWriter};
use retail_etl::table::Table;
use retail_etl::transform::RetailCleaner;
use retail_etl::PipelineConfig;
use rusqlite::Connection;
use serde_json::{Value as Json, json};
use std::cell::Cell;
use std::path::Path;
use tempfile::TempDir;

const RAW_CSV: &str = "\
Customer ID,Age,Gender,Item Purchased,Category,Purchase Amount (USD),Review Rating,Promo Code Used,Frequency of Purchases,Transaction Date
1,55,Male,Blouse,Clothing,53,3.1,Yes,Fortnightly,2024-01-03
2,19,Male,Sweater,Clothing,64,,Yes,Bi-Weekly,2024-01-04
3,50,Male,Jeans,Clothing,73,3.1,Yes,Weekly,2024-01-05
4,21,Male,Sandals,Footwear,90,3.5,No,Every 3 Months,2024-01-06
5,45,Female,Blouse,Clothing,49,2.7,No,Annually,not a date
6,46,Female,Sneakers,Footwear,20,,No,Monthly,2024-01-08
7,63,Female,Shirt,Clothing,85,3.2,Yes,Quarterly,2024-01-09
8,27,Female,Coat,Outerwear,34,,No,Weekly,2024-01-10
";

fn write_raw_csv(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("customer_shopping_behavior_raw.csv");
    std::fs::write(&path, RAW_CSV).unwrap();
    path
}

fn query_column<T: rusqlite::types::FromSql>(db: &Path, sql: &str) -> Vec<T> {
    let conn = Connection::open(db).unwrap();
    let mut stmt = conn.prepare(sql).unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<rusqlite::Result<Vec<T>>>()
        .unwrap()
}

#[test]
fn test_csv_to_sqlite_pipeline() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = PipelineConfig::default()
        .with_source(write_raw_csv(temp_dir.path()))
        .with_database(temp_dir.path().join("retail.db"))
        .with_table("retail_sales_clean");

    let outcome = run_pipeline(&config);
    assert_eq!(outcome, RunOutcome::Loaded { rows: 8 });

    let columns: Vec<String> = query_column(
        &config.database,
        "SELECT name FROM pragma_table_info('retail_sales_clean')",
    );
    assert_eq!(
        columns,
        vec![
            "customer_id",
            "age",
            "gender",
            "item_purchased",
            "category",
            "purchase_amount_usd",
            "review_rating",
            "frequency_of_purchases",
            "transaction_date",
            "frequency_days",
            "age_group",
        ]
    );

    // Row order is kept from the source file
    let ids: Vec<i64> = query_column(
        &config.database,
        "SELECT customer_id FROM retail_sales_clean ORDER BY rowid",
    );
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());

    // Clothing median is 3.1, Footwear has only 3.5, Outerwear has no ratings
    let ratings: Vec<Option<f64>> = query_column(
        &config.database,
        "SELECT review_rating FROM retail_sales_clean ORDER BY rowid",
    );
    assert_eq!(
        ratings,
        vec![
            Some(3.1),
            Some(3.1),
            Some(3.1),
            Some(3.5),
            Some(2.7),
            Some(3.5),
            Some(3.2),
            None
        ]
    );

    let frequencies: Vec<(String, Option<i64>)> = {
        let conn = Connection::open(&config.database)?;
        let mut stmt = conn.prepare(
            "SELECT frequency_of_purchases, frequency_days FROM retail_sales_clean ORDER BY rowid",
        )?;
        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?
    };
    assert_eq!(frequencies[1], ("Fortnightly".to_string(), Some(14)));
    assert_eq!(frequencies[3], ("Quarterly".to_string(), Some(90)));
    assert_eq!(frequencies[4], ("Annually".to_string(), Some(365)));

    let groups: Vec<String> = query_column(
        &config.database,
        "SELECT age_group FROM retail_sales_clean ORDER BY age",
    );
    assert_eq!(
        groups,
        vec![
            "Young Adult",
            "Young Adult",
            "Adult",
            "Adult",
            "Middle-aged",
            "Middle-aged",
            "Senior",
            "Senior",
        ]
    );

    let dates: Vec<Option<String>> = query_column(
        &config.database,
        "SELECT transaction_date FROM retail_sales_clean ORDER BY rowid",
    );
    assert_eq!(dates[0].as_deref(), Some("2024-01-03 00:00:00"));
    assert_eq!(dates[4], None);

    Ok(())
}

#[test]
fn test_rerun_replaces_previous_table() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db = temp_dir.path().join("retail.db");
    {
        let conn = Connection::open(&db)?;
        conn.execute_batch(
            "CREATE TABLE retail_sales_clean (old_a TEXT, old_b TEXT, old_c TEXT);
             INSERT INTO retail_sales_clean VALUES ('1', '2', '3');",
        )?;
    }

    let source = temp_dir.path().join("small.csv");
    std::fs::write(&source, "Item Purchased,Age\nHat,30\nCoat,40\nScarf,50\n")?;

    let pipeline = Pipeline::new(
        CsvReader::new(&source),
        RetailCleaner::new(),
        SqliteWriter::new(&db, "retail_sales_clean"),
    );
    // Three distinct ages still form four quartile edges
    assert_eq!(pipeline.run(), RunOutcome::Loaded { rows: 3 });

    let columns: Vec<String> = query_column(
        &db,
        "SELECT name FROM pragma_table_info('retail_sales_clean')",
    );
    assert_eq!(columns, vec!["item_purchased", "age", "age_group"]);

    let items: Vec<String> = query_column(&db, "SELECT item_purchased FROM retail_sales_clean");
    assert_eq!(items, vec!["Hat", "Coat", "Scarf"]);

    Ok(())
}

#[test]
fn test_missing_source_stops_before_transform_and_load() {
    struct CountingCleaner<'a>(&'a Cell<usize>);

    impl Transformer for CountingCleaner<'_> {
        type Input = Table;
        type Output = Table;
        fn transform(&self, input: Self::Input) -> Result<Self::Output> {
            self.0.set(self.0.get() + 1);
            Ok(input)
        }
    }

    struct CountingLoader<'a>(&'a Cell<usize>);

    impl Loader for CountingLoader<'_> {
        type Input = Table;
        fn load(&self, input: Self::Input) -> Result<usize> {
            self.0.set(self.0.get() + 1);
            Ok(input.len())
        }
    }

    let temp_dir = TempDir::new().unwrap();
    let reader = CsvReader::new(temp_dir.path().join("nope.csv"));
    assert!(reader.extract().is_err());

    let transforms = Cell::new(0);
    let loads = Cell::new(0);
    let pipeline = Pipeline::new(reader, CountingCleaner(&transforms), CountingLoader(&loads));

    assert_eq!(pipeline.run(), RunOutcome::NoData);
    assert_eq!(transforms.get(), 0, "Transform must not run without data");
    assert_eq!(loads.get(), 0, "Load must not run without data");
}

#[test]
fn test_missing_source_leaves_database_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let config = PipelineConfig::default()
        .with_source(temp_dir.path().join("nope.csv"))
        .with_database(temp_dir.path().join("retail.db"));

    assert_eq!(run_pipeline(&config), RunOutcome::NoData);
    assert!(!config.database.exists());
}

#[test]
fn test_malformed_source_reports_no_data() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("broken.csv");
    std::fs::write(&source, "a,b\n1,2\n3,4,5\n").unwrap();

    let config = PipelineConfig::default()
        .with_source(&source)
        .with_database(temp_dir.path().join("retail.db"));

    assert_eq!(run_pipeline(&config), RunOutcome::NoData);
    assert!(!config.database.exists());
}

#[test]
fn test_unwritable_sink_reports_load_failure() {
    let temp_dir = TempDir::new().unwrap();
    let config = PipelineConfig::default()
        .with_source(write_raw_csv(temp_dir.path()))
        .with_database(temp_dir.path().join("missing").join("retail.db"));

    assert_eq!(run_pipeline(&config), RunOutcome::LoadFailed);
}

#[test]
fn test_preview_writes_ndjson() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = PipelineConfig::default()
        .with_source(write_raw_csv(temp_dir.path()))
        .with_database(temp_dir.path().join("retail.db"));
    let output = temp_dir.path().join("preview.ndjson");

    assert_eq!(run_preview(&config, &output), RunOutcome::Loaded { rows: 8 });
    assert!(!config.database.exists(), "Preview must not touch the database");

    let content = std::fs::read_to_string(&output)?;
    let rows: Vec<Json> = content
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(rows.len(), 8);

    assert_eq!(rows[1]["frequency_of_purchases"], json!("Fortnightly"));
    assert_eq!(rows[1]["frequency_days"], json!(14));
    assert_eq!(rows[1]["review_rating"], json!(3.1));
    assert_eq!(rows[7]["review_rating"], json!(null));
    assert!(rows[0].get("promo_code_used").is_none());
    assert_eq!(rows[0]["transaction_date"], json!("2024-01-03 00:00:00"));

    Ok(())
}

#[test]
fn test_nan_cells_are_treated_as_missing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("nan.csv");
    std::fs::write(
        &source,
        "Category,Review Rating,Age\n\
         Outerwear,3,20\n\
         Outerwear,-nan,-nan\n\
         Outerwear,,30\n\
         Outerwear,5,40\n\
         Outerwear,4,50\n",
    )?;
    let config = PipelineConfig::default()
        .with_source(&source)
        .with_database(temp_dir.path().join("retail.db"));

    assert_eq!(run_pipeline(&config), RunOutcome::Loaded { rows: 5 });

    // Median of {3, 5, 4} is 4, and the NaN row is filled like the blank one
    let ratings: Vec<Option<f64>> = query_column(
        &config.database,
        "SELECT review_rating FROM retail_sales_clean ORDER BY rowid",
    );
    assert_eq!(
        ratings,
        vec![Some(3.0), Some(4.0), Some(4.0), Some(5.0), Some(4.0)]
    );

    let groups: Vec<Option<String>> = query_column(
        &config.database,
        "SELECT age_group FROM retail_sales_clean ORDER BY rowid",
    );
    assert_eq!(
        groups,
        vec![
            Some("Young Adult".to_string()),
            None,
            Some("Adult".to_string()),
            Some("Middle-aged".to_string()),
            Some("Senior".to_string()),
        ]
    );

    Ok(())
}
