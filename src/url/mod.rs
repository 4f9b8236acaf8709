//! URL handling module for Rufus
//!
//! This module resolves hrefs found on pages into absolute crawlable URLs,
//! validates seed URLs, and decides which hosts a crawl may wander onto.

mod normalize;
mod scope;

// Re-export main functions
pub use normalize::{is_http, normalize, parse_seed};
pub use scope::{extract_domain, matches_wildcard, CrawlScope};
