//! Configuration module for Rufus
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and turns them into the per-crawl [`CrawlConfig`].
//!
//! # Example
//!
//! ```no_run
//! use rufus::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("rufus.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlConfig, CrawlerConfig, OutputConfig, ScopeConfig, SummarizerConfig,
    UserAgentConfig, DEFAULT_CRAWL_DEPTH, DEFAULT_FETCH_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

use crate::ConfigResult;

impl Config {
    /// Validates the configuration, e.g. after command-line overrides
    pub fn validate(&self) -> ConfigResult<()> {
        validation::validate(self)
    }
}

impl CrawlConfig {
    /// Validates the settings before a crawl starts
    pub fn validate(&self) -> ConfigResult<()> {
        validation::validate_crawl_config(self)
    }
}
