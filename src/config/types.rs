use crate::url::{extract_domain, CrawlScope};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Default maximum crawl depth
pub const DEFAULT_CRAWL_DEPTH: u32 = 2;

/// Default per-fetch timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

/// Main configuration structure for Rufus
///
/// Every section and field has a default, so an empty file (or no file at
/// all) is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub scope: ScopeConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub summarizer: SummarizerConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of link hops from the seed URL
    pub max_depth: u32,

    /// Politeness delay between processing a page and dispatching its links (milliseconds)
    ///
    /// Skipped for pages with no in-scope links and for pages at the maximum depth.
    pub delay_ms: u64,

    /// Timeout for a single page fetch (seconds)
    pub fetch_timeout_secs: u64,

    /// Maximum number of fetches in flight at once
    pub max_concurrent_fetches: u32,

    /// Whether links on irrelevant pages are still followed
    pub follow_irrelevant_links: bool,

    /// Optional deadline for the whole crawl (seconds)
    pub crawl_timeout_secs: Option<u64>,

    /// Render pages in a headless browser instead of plain HTTP
    pub dynamic: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_CRAWL_DEPTH,
            delay_ms: 1000,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            max_concurrent_fetches: 8,
            follow_irrelevant_links: true,
            crawl_timeout_secs: None,
            dynamic: false,
        }
    }
}

impl CrawlerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Which hosts the crawl may follow links onto
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScopeConfig {
    /// Domain patterns (e.g., "example.com" or "*.example.com"); empty means no restriction
    pub allowed_domains: Vec<String>,

    /// Restrict the crawl to the seed's host
    pub same_domain: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "RufusBot".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Extractive summarizer configuration (all lengths in words)
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SummarizerConfig {
    pub chunk_size: usize,
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            min_length: 40,
            max_length: 150,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the JSON report file
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: "report.json".to_string(),
        }
    }
}

/// Settings for one crawl invocation
///
/// Immutable for the duration of the crawl and shared read-only by every task.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum number of link hops from the seed; tasks beyond it are never fetched
    pub max_depth: u32,

    /// Politeness delay, applied once per processed page before its links are dispatched
    ///
    /// Skipped when the page has no in-scope links left or sits at `max_depth`.
    pub delay: Duration,

    /// Instructions for the relevance gate; empty keeps every page
    pub instructions: String,

    /// Whether irrelevant pages still contribute links to the frontier
    pub follow_irrelevant_links: bool,

    /// Maximum number of fetches in flight at once
    pub max_concurrent_fetches: usize,

    /// Optional whole-crawl deadline
    pub crawl_timeout: Option<Duration>,

    /// Hosts that discovered links may lead to
    pub scope: CrawlScope,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_CRAWL_DEPTH,
            delay: Duration::from_secs(1),
            instructions: String::new(),
            follow_irrelevant_links: true,
            max_concurrent_fetches: 8,
            crawl_timeout: None,
            scope: CrawlScope::unrestricted(),
        }
    }
}

impl CrawlConfig {
    /// Creates a config with the given depth and instructions and defaults elsewhere
    pub fn new(max_depth: u32, instructions: impl Into<String>) -> Self {
        Self {
            max_depth,
            instructions: instructions.into(),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_scope(mut self, scope: CrawlScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_crawl_timeout(mut self, timeout: Duration) -> Self {
        self.crawl_timeout = Some(timeout);
        self
    }

    pub fn with_follow_irrelevant_links(mut self, follow: bool) -> Self {
        self.follow_irrelevant_links = follow;
        self
    }

    pub fn with_max_concurrent_fetches(mut self, max: usize) -> Self {
        self.max_concurrent_fetches = max;
        self
    }
}

impl Config {
    /// Builds the settings for crawling `seed` with the given instructions
    pub fn crawl_config(&self, seed: &Url, instructions: &str) -> CrawlConfig {
        let mut scope = CrawlScope::new(&self.scope.allowed_domains);
        if self.scope.same_domain && extract_domain(seed).is_some() {
            scope.extend(CrawlScope::same_domain(seed));
        }

        CrawlConfig {
            max_depth: self.crawler.max_depth,
            delay: Duration::from_millis(self.crawler.delay_ms),
            instructions: instructions.to_string(),
            follow_irrelevant_links: self.crawler.follow_irrelevant_links,
            max_concurrent_fetches: self.crawler.max_concurrent_fetches as usize,
            crawl_timeout: self.crawler.crawl_timeout_secs.map(Duration::from_secs),
            scope,
        }
    }
}
