//! Crawl task definitions and the terminal states a task can reach
//!
//! A task moves through `Pending -> Fetching -> Extracted -> Recursing -> Done`,
//! and may leave that path early by being pruned. Every terminal state
//! contributes zero or one page plus whatever its children contributed.

use crate::crawler::FetchFailure;
use std::fmt;
use url::Url;

/// A unit of crawl work
///
/// `depth` is the number of link hops from the seed (the seed is depth 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: Url,
    pub depth: u32,
}

impl CrawlTask {
    pub fn new(url: Url, depth: u32) -> Self {
        Self { url, depth }
    }

    /// The seed task of a crawl
    pub fn seed(url: Url) -> Self {
        Self::new(url, 0)
    }

    /// A task for a link discovered on this task's page
    pub fn child(&self, url: Url) -> Self {
        Self::new(url, self.depth + 1)
    }
}

/// Why a branch of the crawl was terminated without producing a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneReason {
    /// The task is further from the seed than the configured maximum depth
    DepthExceeded,

    /// Another task already claimed this URL
    Duplicate,

    /// The fetch adapter reported a failure
    FetchFailed(FetchFailure),

    /// The whole-crawl deadline elapsed before the task could finish fetching
    Cancelled,
}

/// How a single task ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Terminated before extraction; produces nothing
    Pruned(PruneReason),

    /// Fetched, relevant, and recorded as a page result
    Emitted,

    /// Fetched but judged irrelevant; links may still be followed
    Filtered,
}

impl TaskOutcome {
    /// Returns true if the page was fetched and its text extracted
    pub fn was_fetched(&self) -> bool {
        matches!(self, Self::Emitted | Self::Filtered)
    }

    /// Short label used in logs and statistics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pruned(PruneReason::DepthExceeded) => "depth_exceeded",
            Self::Pruned(PruneReason::Duplicate) => "duplicate",
            Self::Pruned(PruneReason::FetchFailed(_)) => "fetch_failed",
            Self::Pruned(PruneReason::Cancelled) => "cancelled",
            Self::Emitted => "emitted",
            Self::Filtered => "filtered",
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pruned(PruneReason::FetchFailed(failure)) => {
                write!(f, "{} ({})", self.label(), failure)
            }
            _ => write!(f, "{}", self.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_task_depth() {
        let seed = CrawlTask::seed(Url::parse("https://example.com/").unwrap());
        let child = seed.child(Url::parse("https://example.com/a").unwrap());
        let grandchild = child.child(Url::parse("https://example.com/b").unwrap());

        assert_eq!(seed.depth, 0);
        assert_eq!(child.depth, 1);
        assert_eq!(grandchild.depth, 2);
    }

    #[test]
    fn test_was_fetched() {
        assert!(TaskOutcome::Emitted.was_fetched());
        assert!(TaskOutcome::Filtered.was_fetched());
        assert!(!TaskOutcome::Pruned(PruneReason::Duplicate).was_fetched());
        assert!(!TaskOutcome::Pruned(PruneReason::FetchFailed(FetchFailure::Timeout)).was_fetched());
    }

    #[test]
    fn test_display() {
        assert_eq!(TaskOutcome::Emitted.to_string(), "emitted");
        assert_eq!(
            TaskOutcome::Pruned(PruneReason::DepthExceeded).to_string(),
            "depth_exceeded"
        );
        assert_eq!(
            TaskOutcome::Pruned(PruneReason::FetchFailed(FetchFailure::BadStatus(503))).to_string(),
            "fetch_failed (HTTP status 503)"
        );
    }
}
