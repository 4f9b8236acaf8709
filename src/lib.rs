//! Rufus: a relevance-gated site crawler
//!
//! This crate crawls a website from a seed URL up to a bounded depth, keeps the
//! pages whose text is relevant to a set of user instructions, and condenses the
//! collected text into a summary report.

pub mod client;
pub mod config;
pub mod crawler;
pub mod output;
pub mod relevance;
pub mod state;
pub mod summarize;
pub mod url;

use thiserror::Error;

/// Main error type for Rufus operations
///
/// Individual page failures never surface here; they prune a branch of the
/// crawl and are only visible in the crawl statistics.
#[derive(Debug, Error)]
pub enum RufusError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Browser error: {0}")]
    Browser(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Rufus operations
pub type Result<T> = std::result::Result<T, RufusError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use client::ScrapeClient;
pub use config::{Config, CrawlConfig};
pub use crawler::{crawl, crawl_with, Coordinator, FetchFailure, Fetcher, PageResult, ResultSet};
pub use output::ScrapeReport;
pub use relevance::{is_relevant, RelevanceClassifier};
pub use summarize::{ExtractiveSummarizer, Summarizer};
pub use crate::url::{normalize, parse_seed};
