//! Output module for crawl reports and statistics
//!
//! This module handles:
//! - Building the structured report of one scrape
//! - Writing it to disk as pretty-printed JSON
//! - Recording and printing crawl statistics

mod report;
pub mod stats;

pub use report::ScrapeReport;
pub use stats::{print_statistics, CrawlStats, StatsRecorder};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
