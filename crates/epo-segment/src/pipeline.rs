//! End-to-end segmentation pipeline
//!
//! Fetches the identifier universe, applies the age filter, partitions
//! into chunks, runs the worker pool, and exports the aggregate.

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::config::SegmentConfig;
use crate::export::write_segment_csv;
use crate::filter::within_age_range;
use crate::orchestrator::{run_chunks, SegmentStats};
use crate::partition::partition;
use crate::sources::RegistrySources;
use crate::worker::RegistryWorker;

/// Segmentation pipeline
pub struct SegmentPipeline {
    config: SegmentConfig,
}

impl SegmentPipeline {
    /// Create a new pipeline
    pub fn new(config: SegmentConfig) -> Self {
        Self { config }
    }

    /// Run the full segmentation pipeline
    ///
    /// Steps:
    /// 1. Fetch the identifier universe from the registry
    /// 2. Keep identifiers inside the configured age range
    /// 3. Partition into fixed-size chunks
    /// 4. Process chunks on the bounded worker pool
    /// 5. Export the aggregate to a timestamped CSV
    ///
    /// A run with failed chunks still completes; the stats record how
    /// many contributed nothing.
    pub async fn run(&self) -> Result<SegmentStats> {
        info!(
            chunk_size = self.config.chunk_size,
            concurrency = self.config.concurrency,
            "Starting segmentation pipeline"
        );

        // 1. Identifier universe
        info!("Phase 1: Fetching identifier universe");
        let sources = RegistrySources::connect(&self.config).await?;
        let universe = sources
            .fetch_identifiers()
            .await
            .context("Failed to fetch identifiers")?;

        // 2. Age filter
        info!("Phase 2: Age filter");
        let today = Local::now().date_naive();
        let identifiers: Vec<String> = universe
            .into_iter()
            .filter(|(_, birth)| {
                within_age_range(*birth, today, self.config.min_age, self.config.max_age)
            })
            .map(|(dni, _)| dni)
            .collect();

        info!(
            identifiers = identifiers.len(),
            min_age = self.config.min_age,
            max_age = self.config.max_age,
            "Identifiers within age range"
        );

        // 3. Partition
        info!("Phase 3: Partitioning");
        let chunks = partition(&identifiers, self.config.chunk_size);
        info!(chunks = chunks.len(), "Identifier set partitioned");

        // 4. Worker pool
        info!("Phase 4: Chunk processing");
        let worker = RegistryWorker::new(sources);
        let (records, stats) = run_chunks(&worker, chunks, self.config.concurrency).await;

        // 5. Export
        info!("Phase 5: CSV export");
        let path = write_segment_csv(&records, &self.config.output_dir)
            .context("Failed to write segment CSV")?;

        info!(
            output = %path.display(),
            rows = stats.rows,
            failed_chunks = stats.chunks_failed,
            "Segmentation pipeline completed"
        );

        Ok(stats)
    }
}
