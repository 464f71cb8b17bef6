//! Directory-wide ingestion
//!
//! Applies the extractor across every file matched by a glob pattern,
//! accumulating records into one table. File enumeration order follows
//! the glob walk and is not guaranteed stable across platforms;
//! callers must not depend on result ordering beyond all lines of all
//! matched files being present.

use std::path::Path;

use anyhow::Result;
use epo_common::EpoError;
use tracing::{debug, info, warn};

use crate::encoding::decode_lossy;
use crate::extract::RecordExtractor;
use crate::models::CandidateRecord;
use crate::normalize::normalize_line;

/// Counters for one directory ingest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub records: usize,
}

/// Process every file matching `pattern` and accumulate the extracted
/// records
///
/// A file that cannot be read is logged and skipped; it never aborts
/// the run. An invalid glob pattern is a configuration error and is
/// returned to the caller.
pub fn ingest_directory(pattern: &str) -> Result<(Vec<CandidateRecord>, AggregateStats)> {
    let paths = glob::glob(pattern)
        .map_err(|e| EpoError::Pattern(format!("{}: {}", pattern, e)))?;

    let extractor = RecordExtractor::new();
    let mut records = Vec::new();
    let mut stats = AggregateStats::default();

    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable glob entry");
                stats.files_skipped += 1;
                continue;
            },
        };

        info!(file = %path.display(), "Processing file");
        match ingest_file(&path, &extractor, &mut records) {
            Ok(count) => {
                debug!(file = %path.display(), records = count, "File processed");
                stats.files_processed += 1;
            },
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping file");
                stats.files_skipped += 1;
            },
        }
    }

    stats.records = records.len();
    info!(
        files = stats.files_processed,
        skipped = stats.files_skipped,
        records = stats.records,
        "Directory ingest completed"
    );

    Ok((records, stats))
}

/// Decode one file and extract a record from each non-blank line
///
/// Returns the number of records appended.
fn ingest_file(
    path: &Path,
    extractor: &RecordExtractor,
    records: &mut Vec<CandidateRecord>,
) -> Result<usize> {
    let bytes = std::fs::read(path)?;
    let (text, had_replacements) = decode_lossy(&bytes);

    if had_replacements {
        debug!(file = %path.display(), "Some bytes were replaced during decoding");
    }

    let mut count = 0;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let normalized = normalize_line(line);
        if let Some(record) = extractor.extract(&normalized) {
            records.push(record);
            count += 1;
        }
    }

    Ok(count)
}
