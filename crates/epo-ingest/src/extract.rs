//! Record extraction from normalized lines
//!
//! The exports mix three line shapes: complete comma-delimited rows,
//! free-text "no results" banners, and truncated rows. Checks run in
//! strict priority order with no fallthrough, so a truncated row is
//! never misread as a true negative result:
//!
//! 1. Not-found banner -> record with status [`NOT_FOUND_MARKER`]
//! 2. Comma-delimited row with >= 6 segments -> full record
//! 3. Fallback number token -> record with status [`PARTIAL_STATUS`]
//!
//! A line matching none of these, or failing number validation,
//! produces no record. Free-text fields containing commas can shift
//! the positional mapping of branch 2; the priority order is kept
//! as-is rather than guessing.

use regex::Regex;

use crate::models::{CandidateRecord, NA, NOT_FOUND_MARKER, PARTIAL_STATUS};

/// Minimum segment count for the full-record branch
const MIN_SEGMENTS: usize = 6;

/// Extractor for portability export lines
pub struct RecordExtractor {
    number_token: Regex,
    all_digits: Regex,
}

impl RecordExtractor {
    // Both regexes are literals known to compile
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        Self {
            number_token: Regex::new(r"Número: (\d+)").unwrap(),
            all_digits: Regex::new(r"^\d+$").unwrap(),
        }
    }

    /// Extract a record from one normalized line
    ///
    /// Returns `None` when the line yields nothing under the priority
    /// order documented at module level. Every `Some` result carries
    /// a non-empty, all-digit `numero`.
    pub fn extract(&self, line: &str) -> Option<CandidateRecord> {
        // Branch 1: not-found banner
        if line.contains(NOT_FOUND_MARKER) {
            return self
                .capture_number(line)
                .map(|numero| CandidateRecord::number_only(numero, NOT_FOUND_MARKER));
        }

        let segments: Vec<String> = line.split(',').map(clean_segment).collect();

        // Branch 2: complete comma-delimited row
        if segments.len() >= MIN_SEGMENTS {
            return self.map_segments(&segments);
        }

        // Branch 3: truncated row that still carries a number token
        self.capture_number(line)
            .map(|numero| CandidateRecord::number_only(numero, PARTIAL_STATUS))
    }

    /// Pull the digits out of an embedded `Número: <digits>` token
    fn capture_number(&self, line: &str) -> Option<String> {
        self.number_token
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Map segments positionally onto the seven expected fields,
    /// filling missing trailing fields with the N/A sentinel
    fn map_segments(&self, segments: &[String]) -> Option<CandidateRecord> {
        let field = |index: usize| -> String {
            segments
                .get(index)
                .cloned()
                .unwrap_or_else(|| NA.to_string())
        };

        let numero = field(1);
        if numero.is_empty() || !self.all_digits.is_match(&numero) {
            return None;
        }

        Some(CandidateRecord {
            fecha_procesamiento: field(0),
            numero,
            receptor: field(2),
            cedente: field(3),
            asignatario_original: field(4),
            fecha_ventana: field(5),
            estado: field(6),
        })
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a `label:` prefix (everything up to and including the first
/// colon) from a segment, then trim whitespace
fn clean_segment(segment: &str) -> String {
    match segment.split_once(':') {
        Some((_, value)) => value.trim().to_string(),
        None => segment.trim().to_string(),
    }
}
