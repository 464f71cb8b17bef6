//! Partition worker
//!
//! Processes one identifier chunk: fetches the matching registry rows
//! and the full reference table, normalizes the ubigeo join key on
//! both sides, inner-joins, and projects to the output schema.
//! Unmatched identifiers are silently dropped by the inner join.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{first_token, RegistryRow, SegmentRecord, UbigeoRow};
use crate::sources::RegistrySources;

/// Processes one identifier chunk into output records
///
/// The seam between orchestration and source I/O: the orchestrator
/// only sees this trait, so chunk processing can be exercised without
/// live connections.
#[async_trait]
pub trait ChunkProcessor: Send + Sync {
    /// Process one chunk of identifiers
    ///
    /// An `Err` means the whole chunk contributes nothing; the caller
    /// decides whether to continue.
    async fn process(&self, chunk: &[String]) -> Result<Vec<SegmentRecord>>;
}

/// Worker backed by the relational sources
pub struct RegistryWorker {
    sources: RegistrySources,
}

impl RegistryWorker {
    pub fn new(sources: RegistrySources) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl ChunkProcessor for RegistryWorker {
    async fn process(&self, chunk: &[String]) -> Result<Vec<SegmentRecord>> {
        let registry_rows = self.sources.fetch_registry_rows(chunk).await?;
        let reference_rows = self.sources.fetch_reference_table().await?;

        Ok(join_chunk(registry_rows, &reference_rows))
    }
}

/// Inner-join registry rows against the reference table on the
/// trim-normalized ubigeo key and project to the output schema
pub fn join_chunk(
    registry_rows: Vec<RegistryRow>,
    reference_rows: &[UbigeoRow],
) -> Vec<SegmentRecord> {
    let reference: HashMap<&str, &UbigeoRow> = reference_rows
        .iter()
        .map(|row| (row.ubigeo.trim(), row))
        .collect();

    registry_rows
        .into_iter()
        .filter_map(|row| {
            let key = row.ubigeo_nac.as_deref().unwrap_or("").trim().to_string();
            let place = reference.get(key.as_str())?;

            Some(SegmentRecord {
                dni: row.dni,
                fecha_nac: row.fecha_nac,
                new_padre: first_token(row.padre.as_deref()),
                new_madre: first_token(row.madre.as_deref()),
                departamento: place.departamento.clone(),
                provincia: place.provincia.clone(),
                distrito: place.distrito.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn registry_row(dni: &str, ubigeo: &str) -> RegistryRow {
        RegistryRow {
            dni: dni.to_string(),
            fecha_nac: NaiveDate::from_ymd_opt(1990, 5, 20),
            padre: Some("JUAN CARLOS".to_string()),
            madre: Some("MARIA ELENA".to_string()),
            ubigeo_nac: Some(ubigeo.to_string()),
        }
    }

    fn ubigeo_row(ubigeo: &str) -> UbigeoRow {
        UbigeoRow {
            ubigeo: ubigeo.to_string(),
            departamento: "LIMA".to_string(),
            provincia: "LIMA".to_string(),
            distrito: "MIRAFLORES".to_string(),
        }
    }

    #[test]
    fn test_inner_join_drops_unmatched() {
        let registry = vec![registry_row("11111111", "150122"), registry_row("22222222", "999999")];
        let reference = vec![ubigeo_row("150122")];

        let joined = join_chunk(registry, &reference);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].dni, "11111111");
        assert_eq!(joined[0].distrito, "MIRAFLORES");
    }

    #[test]
    fn test_join_key_is_trim_normalized() {
        let registry = vec![registry_row("11111111", " 150122 ")];
        let reference = vec![ubigeo_row("150122 ")];

        let joined = join_chunk(registry, &reference);
        assert_eq!(joined.len(), 1);
    }

    #[test]
    fn test_name_fields_reduced_to_first_token() {
        let registry = vec![registry_row("11111111", "150122")];
        let reference = vec![ubigeo_row("150122")];

        let joined = join_chunk(registry, &reference);
        assert_eq!(joined[0].new_padre, "JUAN");
        assert_eq!(joined[0].new_madre, "MARIA");
    }

    #[test]
    fn test_missing_ubigeo_dropped() {
        let mut row = registry_row("11111111", "150122");
        row.ubigeo_nac = None;
        let reference = vec![ubigeo_row("150122")];

        assert!(join_chunk(vec![row], &reference).is_empty());
    }
}
