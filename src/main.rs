use clap::{Parser, builder::styling};
use eyre::Result;
use owo_colors::OwoColorize;
use retail_etl::cli::{run_pipeline, run_preview};
use retail_etl::{PipelineConfig, RunOutcome};
use std::path::PathBuf;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Retail ETL: clean a retail transactions CSV file and replace a SQL table with it
#[derive(Parser)]
#[command(name = "retail-etl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source configuration from
    #[arg(short, long, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long)]
    debug: bool,

    /// CSV file to extract (overrides RETAIL_ETL_SOURCE)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// SQLite database to load into (overrides RETAIL_ETL_DATABASE)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Table to replace (overrides RETAIL_ETL_TABLE)
    #[arg(short, long)]
    table: Option<String>,

    /// Write the cleaned rows to this NDJSON file instead of the database
    #[arg(long, value_name = "FILE")]
    preview: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let dotenv = dotenvy::from_filename(&cli.env);

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    if let Err(e) = dotenv {
        log::debug!("No dotenv file loaded from {}: {}", cli.env, e);
    }

    let mut config = PipelineConfig::from_env();
    if let Some(source) = cli.source {
        config = config.with_source(source);
    }
    if let Some(database) = cli.database {
        config = config.with_database(database);
    }
    if let Some(table) = cli.table {
        config = config.with_table(table);
    }

    let outcome = match &cli.preview {
        Some(output) => run_preview(&config, output),
        None => {
            log::info!("Database: {}", config.database.display().bright_black());
            run_pipeline(&config)
        }
    };

    match outcome {
        RunOutcome::Loaded { rows } => log::info!("Done, {} rows written", rows.green()),
        RunOutcome::NoData => log::warn!("{}", "No data extracted, nothing loaded".yellow()),
        RunOutcome::TransformFailed | RunOutcome::LoadFailed => {
            log::warn!("{}", "Run finished without durable output".yellow())
        }
    }

    Ok(())
}
