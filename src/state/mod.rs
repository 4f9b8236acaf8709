//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlTask`: a unit of work, a URL at a link distance from the seed
//! - `TaskOutcome` / `PruneReason`: where each task's state machine ended
//! - `VisitedSet`: URLs already dispatched, shared by every task of one crawl

mod task_state;
mod visited;

// Re-export main types
pub use task_state::{CrawlTask, PruneReason, TaskOutcome};
pub use visited::VisitedSet;
