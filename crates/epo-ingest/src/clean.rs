//! Record cleaning
//!
//! Deterministic transform over the accumulated table:
//!
//! 1. Deduplicate by `numero`, keeping the first occurrence
//! 2. Normalize sentinel values ("N/A", "-", "") to `None`
//! 3. Parse both date fields from strict day/month/year, dropping any
//!    trailing time-of-day token; failures become `None`
//! 4. Compute `dias_permanencia` where the window date parsed
//! 5. Drop rows whose estado carries the not-found marker
//! 6. Project to the canonical [`CleanRecord`] schema
//!
//! Output order preserves the post-dedup order; no sort is applied.
//! The reference date is an explicit argument so repeated runs over an
//! unchanged table produce identical output.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::info;

use crate::models::{CandidateRecord, CleanRecord, NA};

/// Day/month/year format used by the exports
const EXPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Normalize a sentinel value to `None`
///
/// "N/A", "-", and the empty string all mean "no data" in the exports.
pub fn normalize_sentinel(value: &str) -> Option<String> {
    match value {
        NA | "-" | "" => None,
        other => Some(other.to_string()),
    }
}

/// Parse an export date, tolerating a trailing time-of-day component
///
/// `"05/01/2024 10:30:00"` parses the same as `"05/01/2024"`.
/// Anything that fails the strict format yields `None`, never an
/// error.
pub fn parse_export_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.split_whitespace().next()?;
    NaiveDate::parse_from_str(date_part, EXPORT_DATE_FORMAT).ok()
}

/// Clean an accumulated table into the canonical schema
///
/// `today` is the reference date for `dias_permanencia`.
pub fn clean_records(records: Vec<CandidateRecord>, today: NaiveDate) -> Vec<CleanRecord> {
    let input_len = records.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut cleaned = Vec::new();

    for record in records {
        // First occurrence wins
        if !seen.insert(record.numero.clone()) {
            continue;
        }

        // Not-found rows are negatives, not portability records
        if record.is_not_found() {
            continue;
        }

        let fecha_ventana = normalize_sentinel(&record.fecha_ventana)
            .as_deref()
            .and_then(parse_export_date);
        let dias_permanencia = fecha_ventana.map(|ventana| (today - ventana).num_days());

        cleaned.push(CleanRecord {
            fecha_procesamiento: normalize_sentinel(&record.fecha_procesamiento)
                .as_deref()
                .and_then(parse_export_date),
            numero: record.numero,
            receptor: normalize_sentinel(&record.receptor),
            cedente: normalize_sentinel(&record.cedente),
            asignatario_original: normalize_sentinel(&record.asignatario_original),
            fecha_ventana,
            estado: normalize_sentinel(&record.estado),
            dias_permanencia,
        });
    }

    info!(
        input = input_len,
        output = cleaned.len(),
        "Cleaning completed"
    );

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NOT_FOUND_MARKER, PARTIAL_STATUS};

    fn full_record(numero: &str, receptor: &str) -> CandidateRecord {
        CandidateRecord {
            fecha_procesamiento: "01/01/2024".to_string(),
            numero: numero.to_string(),
            receptor: receptor.to_string(),
            cedente: "Movistar".to_string(),
            asignatario_original: "Entel".to_string(),
            fecha_ventana: "05/01/2024".to_string(),
            estado: "Activo".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let records = vec![
            full_record("123456789", "Claro"),
            full_record("123456789", "Bitel"),
            full_record("555000111", "Entel"),
        ];

        let cleaned = clean_records(records, today());
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].numero, "123456789");
        assert_eq!(cleaned[0].receptor.as_deref(), Some("Claro"));
        assert_eq!(cleaned[1].numero, "555000111");
    }

    #[test]
    fn test_no_duplicate_numeros_in_output() {
        let records = vec![
            full_record("1", "a"),
            full_record("2", "b"),
            full_record("1", "c"),
            full_record("2", "d"),
            full_record("3", "e"),
        ];

        let cleaned = clean_records(records, today());
        let mut numeros: Vec<&str> = cleaned.iter().map(|r| r.numero.as_str()).collect();
        numeros.sort_unstable();
        numeros.dedup();
        assert_eq!(numeros.len(), cleaned.len());
    }

    #[test]
    fn test_not_found_rows_are_dropped() {
        let records = vec![
            CandidateRecord::number_only("987654321", NOT_FOUND_MARKER),
            full_record("123456789", "Claro"),
        ];

        let cleaned = clean_records(records, today());
        assert_eq!(cleaned.len(), 1);
        assert!(cleaned
            .iter()
            .all(|r| !r.estado.as_deref().unwrap_or("").contains(NOT_FOUND_MARKER)));
    }

    #[test]
    fn test_sentinels_become_none() {
        let record = CandidateRecord::number_only("912345678", PARTIAL_STATUS);
        let cleaned = clean_records(vec![record], today());

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].fecha_procesamiento, None);
        assert_eq!(cleaned[0].receptor, None);
        assert_eq!(cleaned[0].fecha_ventana, None);
        assert_eq!(cleaned[0].dias_permanencia, None);
        assert_eq!(cleaned[0].estado.as_deref(), Some(PARTIAL_STATUS));
    }

    #[test]
    fn test_dash_and_empty_are_sentinels() {
        assert_eq!(normalize_sentinel("-"), None);
        assert_eq!(normalize_sentinel(""), None);
        assert_eq!(normalize_sentinel("N/A"), None);
        assert_eq!(normalize_sentinel("Claro"), Some("Claro".to_string()));
    }

    #[test]
    fn test_date_parse_strips_time_of_day() {
        assert_eq!(
            parse_export_date("05/01/2024 10:30:00"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_export_date("05/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn test_unparsable_date_becomes_none() {
        assert_eq!(parse_export_date("2024-01-05"), None);
        assert_eq!(parse_export_date("31/02/2024"), None);
        assert_eq!(parse_export_date("pendiente"), None);
    }

    #[test]
    fn test_dias_permanencia_from_window_date() {
        let cleaned = clean_records(vec![full_record("123456789", "Claro")], today());
        // 2024-01-15 minus 2024-01-05
        assert_eq!(cleaned[0].dias_permanencia, Some(10));
    }

    #[test]
    fn test_dias_permanencia_none_without_window_date() {
        let mut record = full_record("123456789", "Claro");
        record.fecha_ventana = "pendiente".to_string();

        let cleaned = clean_records(vec![record], today());
        assert_eq!(cleaned[0].fecha_ventana, None);
        assert_eq!(cleaned[0].dias_permanencia, None);
    }

    #[test]
    fn test_cleaning_is_deterministic() {
        let records = vec![
            full_record("1", "a"),
            full_record("2", "b"),
            CandidateRecord::number_only("3", NOT_FOUND_MARKER),
        ];

        let first = clean_records(records.clone(), today());
        let second = clean_records(records, today());
        assert_eq!(first, second);
    }
}
