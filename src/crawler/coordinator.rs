//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the recursive traversal that coordinates every part
//! of a crawl:
//! - Depth bounding and deduplication of tasks
//! - Fetching under the scheduler's concurrency bound and deadline
//! - Text extraction, relevance gating and link discovery
//! - Concurrent fan-out to child tasks and merging of their results
//!
//! Each task returns the results of its own subtree, so the only state shared
//! between concurrently running tasks is the visited set and the statistics.

use crate::config::CrawlConfig;
use crate::crawler::aggregator::{self, PageResult, ResultSet};
use crate::crawler::parser::parse_html;
use crate::crawler::scheduler::Scheduler;
use crate::crawler::{Fetcher, HttpFetcher};
use crate::output::{CrawlStats, StatsRecorder};
use crate::relevance::{RelevanceClassifier, RelevanceGate};
use crate::state::{CrawlTask, PruneReason, TaskOutcome, VisitedSet};
use crate::url::parse_seed;
use crate::{ConfigResult, Result};
use futures::future::{join_all, BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Everything a finished crawl produced
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlOutcome {
    /// Relevant pages, seed first, then each subtree in link order
    pub results: ResultSet,

    pub stats: CrawlStats,

    /// Number of distinct URLs dispatched past the depth check
    pub visited: usize,
}

/// Main crawler coordinator structure
///
/// A coordinator holds the immutable configuration and collaborators of a
/// crawl. Every call to [`Coordinator::run`] starts from an empty visited set,
/// so one coordinator can serve several independent crawls.
pub struct Coordinator {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    gate: RelevanceGate,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - Settings of the crawl, validated here
    /// * `fetcher` - The page source every task fetches through
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ConfigError)` - The configuration is invalid
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn Fetcher>) -> ConfigResult<Self> {
        config.validate()?;
        let gate = RelevanceGate::new(config.instructions.clone());

        Ok(Self {
            config,
            fetcher,
            gate,
        })
    }

    /// Replaces the keyword relevance policy
    pub fn with_classifier(mut self, classifier: Arc<dyn RelevanceClassifier>) -> Self {
        self.gate = RelevanceGate::with_classifier(classifier, self.config.instructions.clone());
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from `seed_url` and returns the relevant pages found
    ///
    /// The only errors are an unparseable or non-HTTP seed. Failures of
    /// individual pages prune their branch and show up in the statistics.
    pub async fn run(&self, seed_url: &str) -> Result<CrawlOutcome> {
        let seed = parse_seed(seed_url)?;
        Ok(self.run_from(seed).await)
    }

    /// Crawls from a seed that already passed [`parse_seed`]
    pub(crate) async fn run_from(&self, seed: Url) -> CrawlOutcome {
        tracing::info!(
            "Starting crawl at {} (max depth {}, instructions: {:?})",
            seed,
            self.config.max_depth,
            self.config.instructions
        );
        let start_time = Instant::now();

        let run = CrawlRun {
            config: &self.config,
            fetcher: self.fetcher.as_ref(),
            gate: &self.gate,
            visited: VisitedSet::new(),
            scheduler: Scheduler::new(&self.config),
            stats: StatsRecorder::new(),
        };

        let results = run.process(CrawlTask::seed(seed)).await;
        let stats = run.stats.snapshot();

        if stats.cancelled > 0 {
            tracing::warn!(
                "Crawl deadline passed, {} tasks were abandoned",
                stats.cancelled
            );
        }

        tracing::info!(
            "Crawl completed: {} relevant of {} fetched pages in {:?}",
            results.len(),
            stats.pages_fetched,
            start_time.elapsed()
        );

        CrawlOutcome {
            results,
            stats,
            visited: run.visited.len(),
        }
    }
}

/// State of one crawl, borrowed by every task of it
struct CrawlRun<'a> {
    config: &'a CrawlConfig,
    fetcher: &'a dyn Fetcher,
    gate: &'a RelevanceGate,
    visited: VisitedSet,
    scheduler: Scheduler,
    stats: StatsRecorder,
}

impl CrawlRun<'_> {
    /// Processes one task and, recursively, everything reachable from it
    ///
    /// Boxed because the future contains the futures of its own children.
    fn process(&self, task: CrawlTask) -> BoxFuture<'_, ResultSet> {
        async move {
            if task.depth > self.config.max_depth {
                return self.prune(&task, PruneReason::DepthExceeded);
            }

            if self.scheduler.is_cancelled() {
                return self.prune(&task, PruneReason::Cancelled);
            }

            if !self.visited.claim(&task.url) {
                return self.prune(&task, PruneReason::Duplicate);
            }

            let html = match self.scheduler.run_fetch(self.fetcher.fetch(&task.url)).await {
                Some(Ok(html)) => html,
                Some(Err(failure)) => {
                    tracing::warn!("Failed to fetch {}: {}", task.url, failure);
                    return self.prune(&task, PruneReason::FetchFailed(failure));
                }
                None => return self.prune(&task, PruneReason::Cancelled),
            };

            let page = parse_html(&html, &task.url);
            let relevant = self.gate.admits(&page.text);

            let outcome = if relevant {
                TaskOutcome::Emitted
            } else {
                TaskOutcome::Filtered
            };
            self.finish(&task, &outcome);

            let own = relevant.then(|| PageResult::new(task.url.as_str(), page.text));

            if !relevant && !self.config.follow_irrelevant_links {
                return ResultSet::from(own);
            }

            let links: Vec<Url> = page
                .links
                .into_iter()
                .filter(|link| self.config.scope.allows(link))
                .collect();

            if links.is_empty() {
                return ResultSet::from(own);
            }
            self.stats.record_links(links.len());

            // Children at max depth + 1 are pruned without fetching, so no pause
            if task.depth < self.config.max_depth && !self.scheduler.politeness_pause().await {
                tracing::debug!("Crawl deadline passed while pausing on {}", task.url);
            }

            let children = links
                .into_iter()
                .map(|link| self.process(task.child(link)));
            let child_results = join_all(children).await;

            aggregator::merge(own, child_results)
        }
        .boxed()
    }

    fn prune(&self, task: &CrawlTask, reason: PruneReason) -> ResultSet {
        self.finish(task, &TaskOutcome::Pruned(reason));
        ResultSet::new()
    }

    fn finish(&self, task: &CrawlTask, outcome: &TaskOutcome) {
        tracing::debug!("[depth {}] {} -> {}", task.depth, task.url, outcome);
        self.stats.record(outcome);
    }
}

/// Crawls a site over plain HTTP with default fetch settings
///
/// # Arguments
///
/// * `seed_url` - Absolute http(s) URL to start from
/// * `config` - Settings of the crawl
///
/// # Returns
///
/// * `Ok(ResultSet)` - Every relevant page reachable within the depth bound
/// * `Err(RufusError)` - The seed or configuration was rejected
///
/// # Example
///
/// ```no_run
/// use rufus::config::CrawlConfig;
/// use rufus::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CrawlConfig::new(1, "product features customer FAQs");
/// let results = crawl("https://example.com", config).await?;
/// println!("{} relevant pages", results.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed_url: &str, config: CrawlConfig) -> Result<ResultSet> {
    let fetcher = Arc::new(HttpFetcher::with_defaults()?);
    crawl_with(seed_url, config, fetcher).await
}

/// Crawls a site through the given fetcher
pub async fn crawl_with(
    seed_url: &str,
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
) -> Result<ResultSet> {
    let coordinator = Coordinator::new(config, fetcher)?;
    Ok(coordinator.run(seed_url).await?.results)
}
