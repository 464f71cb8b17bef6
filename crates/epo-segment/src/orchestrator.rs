//! Parallel chunk orchestration
//!
//! Dispatches one worker invocation per chunk to a bounded concurrent
//! pool and aggregates results as they complete. Ordering across
//! chunks in the final aggregate follows completion order and is not
//! guaranteed; consumers must not rely on it. A failed chunk is
//! logged and contributes zero rows; siblings are never cancelled and
//! failed chunks are not retried.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::models::SegmentRecord;
use crate::worker::ChunkProcessor;

/// Counters for one orchestration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentStats {
    pub chunks_total: usize,
    pub chunks_failed: usize,
    pub rows: usize,
}

impl SegmentStats {
    pub fn chunks_succeeded(&self) -> usize {
        self.chunks_total - self.chunks_failed
    }

    /// Get a summary message
    pub fn summary(&self) -> String {
        format!(
            "Segmentation summary:\n\
             - Chunks processed: {}\n\
             - Successful: {}\n\
             - Failed: {}\n\
             - Rows produced: {}",
            self.chunks_total,
            self.chunks_succeeded(),
            self.chunks_failed,
            self.rows
        )
    }
}

/// Process every chunk with bounded concurrency and concatenate the
/// successful results
///
/// `concurrency` is the worker-pool width; zero is normalized to one.
pub async fn run_chunks<P: ChunkProcessor>(
    processor: &P,
    chunks: Vec<Vec<String>>,
    concurrency: usize,
) -> (Vec<SegmentRecord>, SegmentStats) {
    let concurrency = concurrency.max(1);
    let chunks_total = chunks.len();

    info!(
        chunks = chunks_total,
        concurrency, "Dispatching chunks to worker pool"
    );

    let results: Vec<Option<Vec<SegmentRecord>>> = stream::iter(chunks.into_iter().enumerate())
        .map(|(index, chunk)| async move {
            match processor.process(&chunk).await {
                Ok(rows) => {
                    info!(chunk = index, rows = rows.len(), "Chunk processed");
                    Some(rows)
                },
                Err(e) => {
                    warn!(chunk = index, error = %e, "Chunk failed, contributing zero rows");
                    None
                },
            }
        })
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await;

    let chunks_failed = results.iter().filter(|r| r.is_none()).count();
    let records: Vec<SegmentRecord> = results.into_iter().flatten().flatten().collect();

    let stats = SegmentStats {
        chunks_total,
        chunks_failed,
        rows: records.len(),
    };

    info!(
        succeeded = stats.chunks_succeeded(),
        failed = stats.chunks_failed,
        rows = stats.rows,
        "Chunk processing completed"
    );

    (records, stats)
}
