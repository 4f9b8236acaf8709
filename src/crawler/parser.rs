//! HTML parser for extracting page text and links
//!
//! This module turns a fetched document into:
//! - The visible text, whitespace-normalized, used for relevance and output
//! - The outbound anchor links, resolved and filtered by [`crate::url::normalize`]
//! - The page title, for logging

use crate::url::normalize;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose text content is never visible
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Visible text with all whitespace runs collapsed to a single space
    pub text: String,

    /// Crawlable links in document order, without in-page duplicates
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts text, links and title
///
/// Parsing never fails: malformed markup is repaired by the HTML5 parser
/// and simply yields less text or fewer links.
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - anything [`normalize`] rejects (fragment-only, `javascript:`,
///   `mailto:`, `tel:`, data URIs, unresolvable hrefs)
///
/// # Example
///
/// ```
/// use rufus::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><p>Hello</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: title_of(&document),
        text: text_of(&document),
        links: links_of(&document, base_url),
    }
}

/// Extracts the visible text of an HTML document
///
/// Text inside `script`, `style`, `noscript` and `template` elements is
/// skipped. Text nodes are separated by a space and whitespace runs are
/// collapsed, so the result never has leading or trailing whitespace.
pub fn extract_text(html: &str) -> String {
    text_of(&Html::parse_document(html))
}

/// Extracts the crawlable anchor links of an HTML document
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    links_of(&Html::parse_document(html), base_url)
}

/// Collapses every whitespace run to a single space and trims the ends
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_of(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| clean_text(&element.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

fn text_of(document: &Html) -> String {
    let mut pieces = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });

        if !hidden {
            pieces.push(&**text);
        }
    }

    clean_text(&pieces.join(" "))
}

fn links_of(document: &Html, base_url: &Url) -> Vec<Url> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&a_selector) {
        // Skip if it has the download attribute
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(link) = element
            .value()
            .attr("href")
            .and_then(|href| normalize(base_url, href))
        else {
            continue;
        };

        if seen.insert(link.as_str().to_string()) {
            links.push(link);
        }
    }

    links
}
