//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};

/// How a pipeline run ended
///
/// Stage failures never escape [`Pipeline::run`]; they are logged at the
/// boundary of the stage that raised them and reported here instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every stage ran and the loader wrote `rows` rows
    Loaded { rows: usize },
    /// The extractor produced no data; transform and load were skipped
    NoData,
    /// A cleaning rule failed; nothing was loaded
    TransformFailed,
    /// The sink rejected the write; no durable output was produced
    LoadFailed,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform E::Output)
/// - `L`: Loader type (must load T::Output)
///
/// # Example
/// ```no_run
/// use retail_etl::etl::{Pipeline, RunOutcome};
/// use retail_etl::storage::{CsvReader, SqliteWriter};
/// use retail_etl::transform::RetailCleaner;
///
/// let pipeline = Pipeline::new(
///     CsvReader::new("data/raw.csv"),
///     RetailCleaner::new(),
///     SqliteWriter::new("retail.db", "retail_sales_clean"),
/// );
///
/// if let RunOutcome::Loaded { rows } = pipeline.run() {
///     println!("Loaded {} rows", rows);
/// }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Output>,
    L: Loader<Input = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the complete ETL pipeline once
    ///
    /// Steps:
    /// 1. Extract the dataset from the source
    /// 2. Transform it
    /// 3. Load it to the destination
    ///
    /// A failing stage is logged and the remaining stages are skipped.
    pub fn run(&self) -> RunOutcome {
        log::info!("--- STARTING PIPELINE ---");

        log::info!("[STEP 1] Extracting data...");
        let data = match self.extractor.extract() {
            Ok(data) => data,
            Err(e) => {
                log::error!("[ERROR] Extract failed: {:#}", e);
                log::warn!("--- PIPELINE STOPPED (check the source path) ---");
                return RunOutcome::NoData;
            }
        };

        log::info!("[STEP 2] Transforming data...");
        let transformed = match self.transformer.transform(data) {
            Ok(transformed) => transformed,
            Err(e) => {
                log::error!("[ERROR] Transform failed: {:#}", e);
                log::warn!("--- PIPELINE STOPPED ---");
                return RunOutcome::TransformFailed;
            }
        };

        match self.loader.target() {
            Some(target) => log::info!("[STEP 3] Loading data into {}...", target),
            None => log::info!("[STEP 3] Loading data..."),
        }

        match self.loader.load(transformed) {
            Ok(rows) => {
                log::info!("[SUCCESS] Pipeline complete, {} rows loaded", rows);
                RunOutcome::Loaded { rows }
            }
            Err(e) => {
                log::error!("[ERROR] Load failed: {:#}", e);
                RunOutcome::LoadFailed
            }
        }
    }
}
