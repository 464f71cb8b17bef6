//! EPO Ingest - portability export ingestion tool

use anyhow::Result;
use clap::Parser;
use epo_common::logging::{init_logging, LogConfig, LogLevel};
use epo_ingest::config::IngestConfig;
use epo_ingest::pipeline::IngestPipeline;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "epo-ingest")]
#[command(author, version, about = "Portability export ingestion tool")]
struct Cli {
    /// Glob pattern selecting the export files
    #[arg(short, long)]
    pattern: Option<String>,

    /// Output CSV path
    #[arg(short, long)]
    output: Option<String>,

    /// Skip the persistent-store delta filter
    #[arg(long)]
    no_store: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env()
        .unwrap_or_default()
        .with_file_prefix("epo-ingest");
    if cli.verbose {
        log_config = log_config.with_level(LogLevel::Debug);
    }
    init_logging(&log_config)?;

    let mut config = IngestConfig::from_env().unwrap_or_default();
    if let Some(pattern) = cli.pattern {
        config = config.with_input_pattern(pattern);
    }
    if let Some(output) = cli.output {
        config = config.with_output_path(output);
    }
    if cli.no_store {
        config = config.without_store();
    }
    config.validate()?;

    let report = IngestPipeline::new(config).run().await?;
    info!("{}", report.summary());

    Ok(())
}
