//! Relational source access
//!
//! The segmentation path reads from two independent sources: the
//! identity registry and the ubigeo geographic reference table. Each
//! gets its own pool; workers share no mutable state beyond these
//! pools.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use crate::config::{SegmentConfig, SourceConfig};
use crate::models::{RegistryRow, UbigeoRow};

/// Pooled connections to the registry and reference sources
#[derive(Clone)]
pub struct RegistrySources {
    registry: PgPool,
    reference: PgPool,
    registry_table: String,
    reference_table: String,
}

impl RegistrySources {
    /// Connect to both sources
    pub async fn connect(config: &SegmentConfig) -> Result<Self> {
        let registry = create_pool(&config.registry)
            .await
            .context("Failed to connect to the registry source")?;
        let reference = create_pool(&config.reference)
            .await
            .context("Failed to connect to the reference source")?;

        Ok(Self {
            registry,
            reference,
            registry_table: config.registry.table.clone(),
            reference_table: config.reference.table.clone(),
        })
    }

    /// Fetch the identifier universe: every (dni, fecha_nac) pair with
    /// the registry's `sexo = 1` predicate applied
    pub async fn fetch_identifiers(&self) -> Result<Vec<(String, Option<NaiveDate>)>> {
        let query = format!(
            "SELECT dni, fecha_nac FROM {} WHERE sexo = 1",
            self.registry_table
        );

        let rows: Vec<(String, Option<NaiveDate>)> = sqlx::query_as(&query)
            .fetch_all(&self.registry)
            .await
            .context("Failed to fetch identifier universe")?;

        debug!(identifiers = rows.len(), "Fetched identifier universe");
        Ok(rows)
    }

    /// Fetch registry attribute rows for exactly the given identifiers
    pub async fn fetch_registry_rows(&self, dnis: &[String]) -> Result<Vec<RegistryRow>> {
        let query = format!(
            "SELECT dni, fecha_nac, padre, madre, ubigeo_nac FROM {} WHERE dni = ANY($1)",
            self.registry_table
        );

        let rows: Vec<RegistryRow> = sqlx::query_as(&query)
            .bind(dnis)
            .fetch_all(&self.registry)
            .await
            .context("Failed to fetch registry rows for chunk")?;

        Ok(rows)
    }

    /// Fetch the full geographic reference table
    pub async fn fetch_reference_table(&self) -> Result<Vec<UbigeoRow>> {
        let query = format!(
            "SELECT \"Ubigeo\", \"Departamento\", \"Provincia\", \"Distrito\" FROM {}",
            self.reference_table
        );

        let rows: Vec<UbigeoRow> = sqlx::query_as(&query)
            .fetch_all(&self.reference)
            .await
            .context("Failed to fetch the ubigeo reference table")?;

        Ok(rows)
    }
}

async fn create_pool(config: &SourceConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await?;

    Ok(pool)
}
