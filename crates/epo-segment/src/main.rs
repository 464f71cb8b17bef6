//! EPO Segment - registry segmentation tool

use anyhow::Result;
use clap::Parser;
use epo_common::logging::{init_logging, LogConfig, LogLevel};
use epo_segment::config::SegmentConfig;
use epo_segment::pipeline::SegmentPipeline;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "epo-segment")]
#[command(author, version, about = "Registry segmentation tool")]
struct Cli {
    /// Identifiers per chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Concurrent worker count
    #[arg(long)]
    concurrency: Option<usize>,

    /// Output directory for the timestamped CSV
    #[arg(short, long)]
    output: Option<String>,

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
        .with_file_prefix("epo-segment");
    if cli.verbose {
        log_config = log_config.with_level(LogLevel::Debug);
    }
    init_logging(&log_config)?;

    let mut config = SegmentConfig::from_env().unwrap_or_default();
    if let Some(chunk_size) = cli.chunk_size {
        config = config.with_chunk_size(chunk_size);
    }
    if let Some(concurrency) = cli.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(output) = cli.output {
        config = config.with_output_dir(output);
    }
    config.validate()?;

    let stats = SegmentPipeline::new(config).run().await?;
    info!("{}", stats.summary());

    if stats.chunks_failed > 0 {
        info!(
            failed = stats.chunks_failed,
            "Run completed with partial results"
        );
    }

    Ok(())
}
