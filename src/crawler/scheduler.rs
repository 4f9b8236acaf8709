//! Scheduler for fetch concurrency, politeness and the crawl deadline
//!
//! This module handles:
//! - Global concurrency limiting via a semaphore held only while fetching
//! - The politeness delay taken once per processed page
//! - The optional whole-crawl deadline, which abandons in-flight fetches and
//!   delays cooperatively

use crate::config::CrawlConfig;
use crate::crawler::FetchFailure;
use std::future::{self, Future};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{self, Instant};

/// Per-crawl scheduling state
///
/// The scheduler owns no queue: the engine's recursion is the frontier. It
/// only decides when a fetch may start and whether the crawl is still live.
#[derive(Debug)]
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    semaphore: Semaphore,

    max_concurrent_fetches: usize,

    /// Politeness delay between processing a page and dispatching its links
    delay: Duration,

    /// Instant after which nothing new is fetched
    deadline: Option<Instant>,
}

impl Scheduler {
    /// Creates a scheduler for a crawl starting now
    pub fn new(config: &CrawlConfig) -> Self {
        let permits = config.max_concurrent_fetches.max(1);

        Self {
            semaphore: Semaphore::new(permits),
            max_concurrent_fetches: permits,
            delay: config.delay,
            deadline: config.crawl_timeout.map(|timeout| Instant::now() + timeout),
        }
    }

    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns true once the crawl deadline has passed
    pub fn is_cancelled(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Runs a fetch under the concurrency bound
    ///
    /// Waiting for a permit counts toward the crawl deadline. Returns `None`
    /// when the deadline passes before the fetch completes; the fetch future
    /// is dropped at that point.
    pub async fn run_fetch<F>(&self, fetch: F) -> Option<Result<String, FetchFailure>>
    where
        F: Future<Output = Result<String, FetchFailure>>,
    {
        let bounded = async {
            // The semaphore is never closed, so acquisition only fails in theory
            let _permit = self.semaphore.acquire().await.ok();
            fetch.await
        };

        tokio::select! {
            result = bounded => Some(result),
            _ = self.until_deadline() => None,
        }
    }

    /// Sleeps for the politeness delay
    ///
    /// Returns false if the crawl deadline passed first, in which case the
    /// caller must not dispatch further work.
    pub async fn politeness_pause(&self) -> bool {
        if self.delay.is_zero() {
            return !self.is_cancelled();
        }

        tokio::select! {
            _ = time::sleep(self.delay) => !self.is_cancelled(),
            _ = self.until_deadline() => false,
        }
    }

    async fn until_deadline(&self) {
        match self.deadline {
            Some(deadline) => time::sleep_until(deadline).await,
            None => future::pending::<()>().await,
        }
    }
}
