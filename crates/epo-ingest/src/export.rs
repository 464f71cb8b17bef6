//! CSV export of cleaned portability records

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::models::CleanRecord;

/// ISO format used for dates in the output artifact
const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

const HEADER: [&str; 8] = [
    "fecha_procesamiento",
    "numero",
    "receptor",
    "cedente",
    "asignatario_original",
    "fecha_ventana",
    "estado",
    "dias_permanencia",
];

/// Write cleaned records to a UTF-8 CSV with a header row
///
/// Missing values are written as empty fields; dates as `YYYY-MM-DD`.
pub fn write_clean_csv(records: &[CleanRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(HEADER)?;

    for record in records {
        writer.write_record([
            format_date(record.fecha_procesamiento),
            record.numero.clone(),
            record.receptor.clone().unwrap_or_default(),
            record.cedente.clone().unwrap_or_default(),
            record.asignatario_original.clone().unwrap_or_default(),
            format_date(record.fecha_ventana),
            record.estado.clone().unwrap_or_default(),
            record
                .dias_permanencia
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    info!(file = %path.display(), rows = records.len(), "CSV written");

    Ok(())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(OUTPUT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}
