use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use url::Url;

/// The set of URLs already dispatched during one crawl
///
/// A URL is claimed when its task starts, before its fetch completes, so two
/// parents discovering the same link concurrently can never both fetch it.
/// The set only grows; nothing is re-crawled within a run.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically tests for and marks `url`
    ///
    /// Returns true if this call claimed the URL, false if it was already
    /// present. The check and the insert happen under one lock acquisition.
    pub fn claim(&self, url: &Url) -> bool {
        self.lock().insert(url.as_str().to_owned())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // A panic while holding the lock cannot leave the set half-updated,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
