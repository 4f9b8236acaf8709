use crate::{UrlError, UrlResult};
use url::Url;

/// Returns true if the URL uses a scheme the crawler can fetch
pub fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Resolves an href found on `base` into an absolute crawlable URL
///
/// # Rejected hrefs
///
/// - empty or whitespace-only
/// - fragment-only (`#section`), which point back at the same page
/// - anything that fails relative resolution
/// - anything whose resolved scheme is not `http` or `https`
///   (`mailto:`, `javascript:`, `tel:`, `data:`, `ftp:` ...)
///
/// The fragment of the resolved URL is dropped, so `page#a` and `page#b`
/// name the same crawl target. Applying the function to its own output
/// returns that output unchanged.
///
/// # Examples
///
/// ```
/// use rufus::url::normalize;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// let resolved = normalize(&base, "../faq#top").unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/faq");
///
/// assert!(normalize(&base, "mailto:team@example.com").is_none());
/// assert!(normalize(&base, "#pricing").is_none());
/// ```
pub fn normalize(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    if !is_http(&resolved) {
        return None;
    }

    resolved.set_fragment(None);
    Some(resolved)
}

/// Parses and validates a seed URL
///
/// The seed must be an absolute `http`/`https` URL with a host. Its
/// fragment is dropped the same way [`normalize`] drops fragments.
///
/// # Returns
///
/// * `Ok(Url)` - The seed, ready to be dispatched at depth 0
/// * `Err(UrlError)` - The seed is malformed or not crawlable
pub fn parse_seed(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if !is_http(&url) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);
    Ok(url)
}
