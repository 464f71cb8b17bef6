//! Persistent store access for the `bot_moviles` table
//!
//! The core only issues two operations against the store: fetch all
//! known `numero` values and insert new rows. Schema and table
//! creation are provisioning concerns handled elsewhere.

use std::collections::HashSet;

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::models::CleanRecord;

/// Connection settings for the portability store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/bot_moviles_opsitel".to_string(),
            max_connections: 5,
            connect_timeout_secs: 10,
        }
    }
}

impl StoreConfig {
    /// Read settings from `DATABASE_URL` and `DB_MAX_CONNECTIONS`
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            url,
            max_connections,
            ..Self::default()
        })
    }
}

/// Handle on the `bot_moviles` table
pub struct BotMovilesStore {
    pool: PgPool,
}

impl BotMovilesStore {
    /// Connect to the store
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .context("Failed to connect to the portability store")?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by binaries that share one pool)
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch every `numero` already present in the store
    pub async fn fetch_existing_numbers(&self) -> Result<HashSet<String>> {
        let numeros: Vec<String> = sqlx::query_scalar("SELECT numero FROM bot_moviles")
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch existing numeros")?;

        info!(existing = numeros.len(), "Fetched existing numeros");
        Ok(numeros.into_iter().collect())
    }

    /// Insert new rows into the store
    ///
    /// Returns the number of rows inserted. Callers are expected to
    /// have run [`filter_new`] first.
    pub async fn insert_records(&self, records: &[CleanRecord]) -> Result<u64> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;
        let mut inserted = 0u64;

        for record in records {
            let result = sqlx::query(
                "INSERT INTO bot_moviles \
                 (fecha_procesamiento, numero, receptor, cedente, asignatario_original, \
                  fecha_ventana, estado, dias_permanencia) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(record.fecha_procesamiento)
            .bind(&record.numero)
            .bind(&record.receptor)
            .bind(&record.cedente)
            .bind(&record.asignatario_original)
            .bind(record.fecha_ventana)
            .bind(&record.estado)
            .bind(record.dias_permanencia.map(|d| d as i32))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert numero {}", record.numero))?;

            inserted += result.rows_affected();
        }

        tx.commit().await.context("Failed to commit inserts")?;
        info!(inserted, "Inserted new portability records");

        Ok(inserted)
    }
}

/// Keep only the records whose `numero` is not yet in the store
///
/// The result is guaranteed disjoint from `existing`.
pub fn filter_new(records: Vec<CleanRecord>, existing: &HashSet<String>) -> Vec<CleanRecord> {
    records
        .into_iter()
        .filter(|record| !existing.contains(&record.numero))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(numero: &str) -> CleanRecord {
        CleanRecord {
            fecha_procesamiento: None,
            numero: numero.to_string(),
            receptor: None,
            cedente: None,
            asignatario_original: None,
            fecha_ventana: None,
            estado: Some("Activo".to_string()),
            dias_permanencia: None,
        }
    }

    #[test]
    fn test_filter_new_excludes_known_numbers() {
        let existing: HashSet<String> =
            ["123456789".to_string(), "555000111".to_string()].into();
        let records = vec![record("123456789"), record("912345678"), record("555000111")];

        let new = filter_new(records, &existing);
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].numero, "912345678");
    }

    #[test]
    fn test_filter_new_output_disjoint_from_existing() {
        let existing: HashSet<String> = (0..50).map(|i| i.to_string()).collect();
        let records: Vec<CleanRecord> = (25..75).map(|i| record(&i.to_string())).collect();

        let new = filter_new(records, &existing);
        assert!(new.iter().all(|r| !existing.contains(&r.numero)));
        assert_eq!(new.len(), 25);
    }

    #[test]
    fn test_filter_new_with_empty_store() {
        let existing = HashSet::new();
        let records = vec![record("1"), record("2")];
        assert_eq!(filter_new(records, &existing).len(), 2);
    }
}
