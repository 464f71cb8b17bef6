//! CSV export of segmentation results

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::models::SegmentRecord;

const HEADER: [&str; 7] = [
    "dni",
    "fecha_nac",
    "new_padre",
    "new_madre",
    "Departamento",
    "Provincia",
    "Distrito",
];

/// Write segmentation records to a timestamped CSV in `output_dir`
///
/// Returns the path of the written artifact, named
/// `reniec_processed_<YYYYmmdd_HHMMSS>.csv`.
pub fn write_segment_csv(records: &[SegmentRecord], output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = output_dir.join(format!("reniec_processed_{}.csv", timestamp));

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(HEADER)?;

    for record in records {
        writer.write_record([
            record.dni.clone(),
            record
                .fecha_nac
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            record.new_padre.clone(),
            record.new_madre.clone(),
            record.departamento.clone(),
            record.provincia.clone(),
            record.distrito.clone(),
        ])?;
    }

    writer.flush()?;
    info!(file = %path.display(), rows = records.len(), "Segment CSV written");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_record() -> SegmentRecord {
        SegmentRecord {
            dni: "11111111".to_string(),
            fecha_nac: NaiveDate::from_ymd_opt(1990, 5, 20),
            new_padre: "JUAN".to_string(),
            new_madre: "MARIA".to_string(),
            departamento: "LIMA".to_string(),
            provincia: "LIMA".to_string(),
            distrito: "MIRAFLORES".to_string(),
        }
    }

    #[test]
    fn test_write_segment_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_segment_csv(&[sample_record()], dir.path()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("reniec_processed_"));
        assert!(name.ends_with(".csv"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "dni,fecha_nac,new_padre,new_madre,Departamento,Provincia,Distrito"
        );
        assert_eq!(
            lines.next().unwrap(),
            "11111111,1990-05-20,JUAN,MARIA,LIMA,LIMA,MIRAFLORES"
        );
    }
}
