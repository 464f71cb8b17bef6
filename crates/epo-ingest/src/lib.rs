//! EPO Ingest Library
//!
//! Ingests line-oriented text exports of mobile-number portability
//! records, normalizes them into the canonical `bot_moviles` schema,
//! and republishes the rows not yet present in the persistent store.
//!
//! # Pipeline
//!
//! 1. Encoding detection and lossy decode ([`encoding`])
//! 2. Mojibake repair per line ([`normalize`])
//! 3. Pattern-based record extraction ([`extract`])
//! 4. Directory-wide aggregation ([`aggregate`])
//! 5. Dedup, typed parsing, and sentinel cleanup ([`clean`])
//! 6. Delta filter against the `bot_moviles` table ([`store`])
//! 7. CSV export ([`export`])
//!
//! # Example
//!
//! ```no_run
//! use epo_ingest::config::IngestConfig;
//! use epo_ingest::pipeline::IngestPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::from_env()?;
//!     let report = IngestPipeline::new(config).run().await?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod clean;
pub mod config;
pub mod encoding;
pub mod export;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod store;
