//! End-to-end ingest pipeline
//!
//! Wires the ingest stages together: directory ingest, cleaning,
//! optional delta filter against the persistent store, and CSV
//! export.

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::aggregate::{ingest_directory, AggregateStats};
use crate::clean::clean_records;
use crate::config::IngestConfig;
use crate::export::write_clean_csv;
use crate::store::{filter_new, BotMovilesStore};

/// Ingest pipeline
pub struct IngestPipeline {
    config: IngestConfig,
}

impl IngestPipeline {
    /// Create a new pipeline
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Run the full ingest pipeline
    ///
    /// Steps:
    /// 1. Ingest every file matching the configured pattern
    /// 2. Clean the accumulated table
    /// 3. Filter against the store and insert the delta (optional)
    /// 4. Export the result to CSV
    ///
    /// Returns: counters describing what was processed
    pub async fn run(&self) -> Result<IngestReport> {
        info!(pattern = %self.config.input_pattern, "Starting ingest pipeline");

        // 1. Directory ingest
        info!("Phase 1: Directory ingest");
        let (records, aggregate_stats) = ingest_directory(&self.config.input_pattern)
            .context("Directory ingest failed")?;

        // 2. Cleaning
        info!("Phase 2: Cleaning");
        let today = Local::now().date_naive();
        let cleaned = clean_records(records, today);
        let cleaned_count = cleaned.len();

        // 3. Delta filter against the store
        let exported = if self.config.use_store {
            info!("Phase 3: Delta filter against bot_moviles");
            let store_config = self.config.store_config()?;
            let store = BotMovilesStore::connect(&store_config).await?;

            let existing = store.fetch_existing_numbers().await?;
            let new_records = filter_new(cleaned, &existing);

            if new_records.is_empty() {
                info!("No new records to insert");
            } else {
                store
                    .insert_records(&new_records)
                    .await
                    .context("Failed to insert new records")?;
            }

            new_records
        } else {
            info!("Phase 3: Store disabled, exporting full cleaned table");
            cleaned
        };

        // 4. Export
        info!("Phase 4: CSV export");
        write_clean_csv(&exported, &self.config.output_path)
            .context("Failed to write output CSV")?;

        let report = IngestReport {
            aggregate_stats,
            cleaned: cleaned_count,
            exported: exported.len(),
            output_path: self.config.output_path.display().to_string(),
        };

        info!(
            files = report.aggregate_stats.files_processed,
            cleaned = report.cleaned,
            exported = report.exported,
            "Ingest pipeline completed"
        );

        Ok(report)
    }
}

/// Result of one ingest run
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Directory ingest counters
    pub aggregate_stats: AggregateStats,
    /// Rows after cleaning
    pub cleaned: usize,
    /// Rows written to the output artifact
    pub exported: usize,
    /// Where the artifact was written
    pub output_path: String,
}

impl IngestReport {
    /// Get a summary message
    pub fn summary(&self) -> String {
        format!(
            "Ingest summary:\n\
             - Files processed: {}\n\
             - Files skipped: {}\n\
             - Records parsed: {}\n\
             - Records after cleaning: {}\n\
             - Records exported: {}\n\
             - Output: {}",
            self.aggregate_stats.files_processed,
            self.aggregate_stats.files_skipped,
            self.aggregate_stats.records,
            self.cleaned,
            self.exported,
            self.output_path
        )
    }
}
