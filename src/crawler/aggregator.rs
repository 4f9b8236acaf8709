//! Result aggregation
//!
//! Every task returns the results of its own subtree. A parent merges its own
//! page (if it was emitted) with the result sets of its children, so results
//! flow upward by return value and no shared result list is ever locked.

use serde::{Deserialize, Serialize};
use std::slice;
use std::vec;

/// Text extracted from one relevant page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Normalized URL the page was fetched from
    pub url: String,

    /// Whitespace-normalized visible text, possibly empty
    pub content: String,
}

impl PageResult {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Ordered collection of page results
///
/// A node's own page comes before its children's pages, and children appear
/// in the order their links were found. Beyond "each relevant page exactly
/// once" callers should not rely on this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    pages: Vec<PageResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, PageResult> {
        self.pages.iter()
    }

    pub fn pages(&self) -> &[PageResult] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<PageResult> {
        self.pages
    }

    /// URLs of all pages, in result order
    pub fn urls(&self) -> Vec<&str> {
        self.pages.iter().map(|page| page.url.as_str()).collect()
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.pages.iter().any(|page| page.url == url)
    }

    /// Concatenates the non-empty page contents, separated by a blank line
    ///
    /// This is the text handed to the summarizer.
    pub fn aggregated_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.content.as_str())
            .filter(|content| !content.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl From<Option<PageResult>> for ResultSet {
    fn from(page: Option<PageResult>) -> Self {
        Self {
            pages: page.into_iter().collect(),
        }
    }
}

impl FromIterator<PageResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = PageResult>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResultSet {
    type Item = PageResult;
    type IntoIter = vec::IntoIter<PageResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a PageResult;
    type IntoIter = slice::Iter<'a, PageResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Merges a node's own page with its children's results
///
/// No transformation or filtering happens here. The visited set already
/// guarantees that no URL reaches two subtrees.
pub fn merge(own: Option<PageResult>, children: Vec<ResultSet>) -> ResultSet {
    let mut merged = ResultSet::from(own);
    for child in children {
        merged.pages.extend(child.pages);
    }
    merged
}
