//! EPO Segment Library
//!
//! Extracts identity records from the national registry, joins them
//! against the ubigeo geographic reference table, filters by age
//! range, and republishes the enriched result. The identifier set is
//! partitioned into fixed-size chunks processed by a bounded
//! concurrent worker pool; chunk results are aggregated in completion
//! order.
//!
//! # Example
//!
//! ```no_run
//! use epo_segment::config::SegmentConfig;
//! use epo_segment::pipeline::SegmentPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SegmentConfig::from_env()?;
//!     let stats = SegmentPipeline::new(config).run().await?;
//!     println!("{}", stats.summary());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod export;
pub mod filter;
pub mod models;
pub mod orchestrator;
pub mod partition;
pub mod pipeline;
pub mod sources;
pub mod worker;
