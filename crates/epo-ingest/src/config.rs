//! Ingest pipeline configuration

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::store::StoreConfig;

/// Default glob pattern for export drops
pub const DEFAULT_INPUT_PATTERN: &str = "datasets/*.txt";

/// Default output artifact path
pub const DEFAULT_OUTPUT_PATH: &str = "datasets/output/resultado.csv";

/// Configuration for one ingest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Glob pattern selecting the export files to process
    pub input_pattern: String,

    /// Path of the output CSV artifact
    pub output_path: PathBuf,

    /// Whether to filter the cleaned table against the persistent
    /// store before exporting. When false, the full cleaned table is
    /// exported and nothing is inserted.
    pub use_store: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            input_pattern: DEFAULT_INPUT_PATTERN.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            use_store: true,
        }
    }
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// - `EPO_INPUT_PATTERN`: glob pattern for export files
    /// - `EPO_OUTPUT_PATH`: output CSV path
    /// - `EPO_USE_STORE`: filter against the store (true/false)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(pattern) = std::env::var("EPO_INPUT_PATTERN") {
            config.input_pattern = pattern;
        }

        if let Ok(path) = std::env::var("EPO_OUTPUT_PATH") {
            config.output_path = PathBuf::from(path);
        }

        if let Ok(val) = std::env::var("EPO_USE_STORE") {
            config.use_store = val.parse().unwrap_or(true);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the input glob pattern
    pub fn with_input_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.input_pattern = pattern.into();
        self
    }

    /// Set the output path
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Disable the persistent-store delta filter
    pub fn without_store(mut self) -> Self {
        self.use_store = false;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.input_pattern.is_empty() {
            anyhow::bail!("Input pattern cannot be empty");
        }

        if self.output_path.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }

        Ok(())
    }

    /// Store settings, read from the environment when the store is in
    /// use
    pub fn store_config(&self) -> Result<StoreConfig> {
        StoreConfig::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IngestConfig::default();
        assert_eq!(config.input_pattern, DEFAULT_INPUT_PATTERN);
        assert!(config.use_store);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = IngestConfig::new()
            .with_input_pattern("drops/2510/*.txt")
            .with_output_path("out/resultado.csv")
            .without_store();

        assert_eq!(config.input_pattern, "drops/2510/*.txt");
        assert_eq!(config.output_path, PathBuf::from("out/resultado.csv"));
        assert!(!config.use_store);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let config = IngestConfig::new().with_input_pattern("");
        assert!(config.validate().is_err());
    }
}
