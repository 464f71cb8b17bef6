//! Segmentation pipeline configuration

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default chunk size. Trade-off between per-request overhead and
/// per-request payload/time.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default worker-pool width
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Default inclusive age range
pub const DEFAULT_MIN_AGE: i32 = 23;
pub const DEFAULT_MAX_AGE: i32 = 63;

/// Connection settings for one relational source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    pub table: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl SourceConfig {
    pub fn new(url: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            table: table.into(),
            max_connections: 10,
            connect_timeout_secs: 10,
        }
    }
}

/// Configuration for one segmentation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Identity registry source
    pub registry: SourceConfig,

    /// Geographic reference source
    pub reference: SourceConfig,

    /// Identifiers per chunk
    pub chunk_size: usize,

    /// Concurrent worker count
    pub concurrency: usize,

    /// Inclusive age range applied when selecting identifiers
    pub min_age: i32,
    pub max_age: i32,

    /// Directory for the timestamped output artifact
    pub output_dir: PathBuf,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            registry: SourceConfig::new("postgresql://localhost/data_phones", "reniec_lima"),
            reference: SourceConfig::new(
                "postgresql://localhost/base_datos_dacompany",
                "ubigeos_peru",
            ),
            chunk_size: DEFAULT_CHUNK_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            output_dir: PathBuf::from("datasets/output"),
        }
    }
}

impl SegmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// - `REGISTRY_DATABASE_URL` / `REGISTRY_TABLE`
    /// - `REFERENCE_DATABASE_URL` / `REFERENCE_TABLE`
    /// - `EPO_CHUNK_SIZE`, `EPO_CONCURRENCY`
    /// - `EPO_MIN_AGE`, `EPO_MAX_AGE`
    /// - `EPO_OUTPUT_DIR`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("REGISTRY_DATABASE_URL") {
            config.registry.url = url;
        }
        if let Ok(table) = std::env::var("REGISTRY_TABLE") {
            config.registry.table = table;
        }
        if let Ok(url) = std::env::var("REFERENCE_DATABASE_URL") {
            config.reference.url = url;
        }
        if let Ok(table) = std::env::var("REFERENCE_TABLE") {
            config.reference.table = table;
        }
        if let Ok(val) = std::env::var("EPO_CHUNK_SIZE") {
            config.chunk_size = val.parse().unwrap_or(DEFAULT_CHUNK_SIZE);
        }
        if let Ok(val) = std::env::var("EPO_CONCURRENCY") {
            config.concurrency = val.parse().unwrap_or(DEFAULT_CONCURRENCY);
        }
        if let Ok(val) = std::env::var("EPO_MIN_AGE") {
            config.min_age = val.parse().unwrap_or(DEFAULT_MIN_AGE);
        }
        if let Ok(val) = std::env::var("EPO_MAX_AGE") {
            config.max_age = val.parse().unwrap_or(DEFAULT_MAX_AGE);
        }
        if let Ok(dir) = std::env::var("EPO_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the worker-pool width
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the inclusive age range
    pub fn with_age_range(mut self, min_age: i32, max_age: i32) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            anyhow::bail!("Chunk size must be greater than 0");
        }

        if self.concurrency == 0 {
            anyhow::bail!("Concurrency must be greater than 0");
        }

        if self.min_age > self.max_age {
            anyhow::bail!(
                "Minimum age ({}) cannot be greater than maximum age ({})",
                self.min_age,
                self.max_age
            );
        }

        if self.registry.url.is_empty() || self.reference.url.is_empty() {
            anyhow::bail!("Source URLs cannot be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SegmentConfig::default();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.min_age, 23);
        assert_eq!(config.max_age, 63);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SegmentConfig::new()
            .with_chunk_size(500)
            .with_concurrency(8)
            .with_age_range(18, 30)
            .with_output_dir("/tmp/out");

        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.min_age, 18);
        assert_eq!(config.max_age, 30);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(SegmentConfig::new().with_chunk_size(0).validate().is_err());
        assert!(SegmentConfig::new().with_concurrency(0).validate().is_err());
        assert!(SegmentConfig::new().with_age_range(64, 23).validate().is_err());
    }
}
