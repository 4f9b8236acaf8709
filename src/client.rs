//! High-level scrape client
//!
//! [`ScrapeClient`] ties the pieces together: it crawls from a seed URL,
//! aggregates the text of the relevant pages and condenses it into a
//! [`ScrapeReport`].

use crate::config::Config;
use crate::crawler::{build_fetcher, Coordinator, Fetcher};
use crate::output::ScrapeReport;
use crate::relevance::RelevanceClassifier;
use crate::summarize::{ExtractiveSummarizer, Summarizer};
use crate::url::parse_seed;
use crate::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Crawls, filters and summarizes websites
///
/// # Example
///
/// ```no_run
/// use rufus::{Config, ScrapeClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ScrapeClient::from_config(Config::default()).await?;
/// let report = client
///     .scrape("https://example.com", "product features customer FAQs", Some(1))
///     .await?;
/// println!("{}", report.summary);
/// # Ok(())
/// # }
/// ```
pub struct ScrapeClient {
    config: Config,
    config_hash: Option<String>,
    fetcher: Arc<dyn Fetcher>,
    summarizer: Arc<dyn Summarizer>,
    classifier: Option<Arc<dyn RelevanceClassifier>>,
}

impl ScrapeClient {
    /// Creates a client with the fetcher named by the configuration
    pub async fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = build_fetcher(&config).await?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Creates a client around an existing fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        let summarizer = Arc::new(ExtractiveSummarizer::from_config(&config.summarizer));

        Self {
            config,
            config_hash: None,
            fetcher,
            summarizer,
            classifier: None,
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = summarizer;
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn RelevanceClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Records the hash of the configuration file in every report
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls `url` and summarizes the pages relevant to `instructions`
    ///
    /// # Arguments
    ///
    /// * `url` - Seed URL
    /// * `instructions` - Free-text description of what to keep; empty keeps everything
    /// * `depth` - Maximum crawl depth, `None` for the configured depth
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeReport)` - The report, possibly with zero pages
    /// * `Err(RufusError)` - The seed or configuration was rejected
    pub async fn scrape(
        &self,
        url: &str,
        instructions: &str,
        depth: Option<u32>,
    ) -> Result<ScrapeReport> {
        let seed = parse_seed(url)?;

        let mut crawl_config = self.config.crawl_config(&seed, instructions);
        if let Some(depth) = depth {
            crawl_config.max_depth = depth;
        }

        let mut coordinator = Coordinator::new(crawl_config, self.fetcher.clone())?;
        if let Some(classifier) = &self.classifier {
            coordinator = coordinator.with_classifier(classifier.clone());
        }

        let outcome = coordinator.run_from(seed).await;
        info!("Found {} relevant pages after filtering", outcome.results.len());

        let summary = self.summarizer.synthesize(&outcome.results.aggregated_text());
        info!("Summarization complete ({} words)", summary.split_whitespace().count());

        Ok(ScrapeReport {
            source_url: url.to_string(),
            instructions: instructions.to_string(),
            summary,
            pages_found: outcome.results.len(),
            pages: outcome.results.into_pages(),
            stats: outcome.stats,
            config_hash: self.config_hash.clone(),
            generated_at: Utc::now(),
        })
    }
}
