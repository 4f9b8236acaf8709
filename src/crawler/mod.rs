//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Page fetching over HTTP or through a headless browser
//! - HTML parsing into visible text and outbound links
//! - Fetch concurrency, politeness delay and the crawl deadline
//! - The recursive, deduplicated traversal and its result aggregation

pub mod aggregator;
#[cfg(feature = "render")]
mod browser;
mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use aggregator::{PageResult, ResultSet};
#[cfg(feature = "render")]
pub use browser::BrowserFetcher;
pub use coordinator::{crawl, crawl_with, Coordinator, CrawlOutcome};
pub use fetcher::{build_fetcher, build_http_client, FetchFailure, Fetcher, HttpFetcher};
pub use parser::{clean_text, extract_links, extract_text, parse_html, ParsedPage};
pub use scheduler::Scheduler;
