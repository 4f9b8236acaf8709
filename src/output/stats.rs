//! Crawl statistics
//!
//! Tasks record their outcome into lock-free counters while the crawl runs;
//! a [`CrawlStats`] snapshot is taken once the seed task has completed.

use crate::crawler::FetchFailure;
use crate::state::{PruneReason, TaskOutcome};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Crawl statistics summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlStats {
    /// Tasks whose fetch succeeded
    pub pages_fetched: u64,

    /// Fetched pages that passed the relevance gate
    pub pages_emitted: u64,

    /// Fetched pages rejected by the relevance gate
    pub pages_filtered: u64,

    /// Tasks pruned for exceeding the maximum depth
    pub depth_pruned: u64,

    /// Tasks pruned because their URL was already dispatched
    pub duplicates: u64,

    /// Fetches that timed out
    pub fetch_timeouts: u64,

    /// Fetches answered with a non-2xx status
    pub bad_status: u64,

    /// Fetches that failed below HTTP
    pub transport_errors: u64,

    /// Tasks abandoned when the crawl deadline passed
    pub cancelled: u64,

    /// Links dispatched as child tasks
    pub links_discovered: u64,
}

impl CrawlStats {
    /// Total number of failed fetches of any kind
    pub fn fetch_failures(&self) -> u64 {
        self.fetch_timeouts + self.bad_status + self.transport_errors
    }

    /// Total number of tasks that were dispatched
    pub fn tasks(&self) -> u64 {
        self.pages_fetched
            + self.depth_pruned
            + self.duplicates
            + self.fetch_failures()
            + self.cancelled
    }
}

/// Shared counters updated by concurrently running tasks
#[derive(Debug, Default)]
pub struct StatsRecorder {
    pages_fetched: AtomicU64,
    pages_emitted: AtomicU64,
    pages_filtered: AtomicU64,
    depth_pruned: AtomicU64,
    duplicates: AtomicU64,
    fetch_timeouts: AtomicU64,
    bad_status: AtomicU64,
    transport_errors: AtomicU64,
    cancelled: AtomicU64,
    links_discovered: AtomicU64,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the terminal outcome of one task
    pub fn record(&self, outcome: &TaskOutcome) {
        if outcome.was_fetched() {
            bump(&self.pages_fetched);
        }

        let counter = match outcome {
            TaskOutcome::Emitted => &self.pages_emitted,
            TaskOutcome::Filtered => &self.pages_filtered,
            TaskOutcome::Pruned(PruneReason::DepthExceeded) => &self.depth_pruned,
            TaskOutcome::Pruned(PruneReason::Duplicate) => &self.duplicates,
            TaskOutcome::Pruned(PruneReason::Cancelled) => &self.cancelled,
            TaskOutcome::Pruned(PruneReason::FetchFailed(failure)) => match failure {
                FetchFailure::Timeout => &self.fetch_timeouts,
                FetchFailure::BadStatus(_) => &self.bad_status,
                FetchFailure::Transport(_) => &self.transport_errors,
            },
        };
        bump(counter);
    }

    /// Counts links handed to child tasks
    pub fn record_links(&self, count: usize) {
        self.links_discovered
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CrawlStats {
        CrawlStats {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            pages_emitted: self.pages_emitted.load(Ordering::Relaxed),
            pages_filtered: self.pages_filtered.load(Ordering::Relaxed),
            depth_pruned: self.depth_pruned.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            fetch_timeouts: self.fetch_timeouts.load(Ordering::Relaxed),
            bad_status: self.bad_status.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
        }
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Tasks dispatched: {}", stats.tasks());
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Links followed: {}", stats.links_discovered);
    println!();

    println!("Fetched Pages:");
    println!("  Relevant: {}", stats.pages_emitted);
    println!("  Filtered: {}", stats.pages_filtered);
    println!();

    println!("Pruned Tasks:");
    println!("  Depth exceeded: {}", stats.depth_pruned);
    println!("  Duplicate: {}", stats.duplicates);
    println!("  Cancelled: {}", stats.cancelled);
    println!();

    if stats.fetch_failures() > 0 {
        println!("Fetch Failures:");
        println!("  Timeouts: {}", stats.fetch_timeouts);
        println!("  Bad status: {}", stats.bad_status);
        println!("  Transport errors: {}", stats.transport_errors);
        println!();
    }

    let attempted = stats.pages_fetched + stats.fetch_failures();
    let success_rate = if attempted > 0 {
        (stats.pages_fetched as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };
    println!("Fetch success rate: {:.1}%", success_rate);
}
