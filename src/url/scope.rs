use url::Url;

/// Extracts the lowercase host from a URL
///
/// Returns None for URLs without a host, which never happens for
/// URLs that passed [`crate::url::normalize`].
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks if a domain matches a scope pattern
///
/// Two kinds of patterns are supported:
/// 1. Exact: `"example.com"` matches only `example.com`
/// 2. Wildcard: `"*.example.com"` matches `example.com` itself and any
///    subdomain of it, however deeply nested
///
/// # Examples
///
/// ```
/// use rufus::url::matches_wildcard;
///
/// assert!(matches_wildcard("example.com", "example.com"));
/// assert!(!matches_wildcard("example.com", "blog.example.com"));
/// assert!(matches_wildcard("*.example.com", "example.com"));
/// assert!(matches_wildcard("*.example.com", "api.v2.example.com"));
/// assert!(!matches_wildcard("*.example.com", "notexample.com"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            candidate == base
                || candidate
                    .strip_suffix(base)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => candidate == pattern,
    }
}

/// The set of hosts a crawl is allowed to follow links onto
///
/// An empty scope is unrestricted: every resolved link is followed. The
/// seed URL is always crawled regardless of scope; the scope only filters
/// outbound links during link discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlScope {
    patterns: Vec<String>,
}

impl CrawlScope {
    /// A scope that follows links to any host
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Builds a scope from exact or `*.` wildcard domain patterns
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// A scope restricted to the exact host of `seed`
    pub fn same_domain(seed: &Url) -> Self {
        Self {
            patterns: extract_domain(seed).into_iter().collect(),
        }
    }

    /// Adds the patterns of `other` to this scope
    pub fn extend(&mut self, other: CrawlScope) {
        for pattern in other.patterns {
            if !self.patterns.contains(&pattern) {
                self.patterns.push(pattern);
            }
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if a link to `url` may be followed
    pub fn allows(&self, url: &Url) -> bool {
        if self.is_unrestricted() {
            return true;
        }

        match extract_domain(url) {
            Some(domain) => self
                .patterns
                .iter()
                .any(|pattern| matches_wildcard(pattern, &domain)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_extract_domain_lowercases() {
        assert_eq!(
            extract_domain(&url("https://Docs.Example.COM:8443/a")),
            Some("docs.example.com".to_string())
        );
    }

    #[test]
    fn test_wildcard_rejects_partial_suffix() {
        assert!(!matches_wildcard("*.example.com", "myexample.com"));
        assert!(!matches_wildcard("*.example.com", "example.com.org"));
        assert!(!matches_wildcard("*.example.com", ""));
    }

    #[test]
    fn test_unrestricted_scope_allows_everything() {
        let scope = CrawlScope::unrestricted();
        assert!(scope.is_unrestricted());
        assert!(scope.allows(&url("https://anything.org/")));
    }

    #[test]
    fn test_scope_with_patterns() {
        let scope = CrawlScope::new(["example.com", " *.Docs.IO "]);
        assert_eq!(scope.patterns(), ["example.com", "*.docs.io"]);

        assert!(scope.allows(&url("https://example.com/faq")));
        assert!(!scope.allows(&url("https://blog.example.com/")));
        assert!(scope.allows(&url("https://docs.io/")));
        assert!(scope.allows(&url("http://api.v1.docs.io/ref")));
        assert!(!scope.allows(&url("https://other.com/")));
    }

    #[test]
    fn test_same_domain_scope() {
        let scope = CrawlScope::same_domain(&url("https://shop.example.com/start"));
        assert!(scope.allows(&url("https://shop.example.com/cart")));
        assert!(!scope.allows(&url("https://example.com/")));
    }

    #[test]
    fn test_extend_deduplicates() {
        let mut scope = CrawlScope::new(["example.com"]);
        scope.extend(CrawlScope::new(["example.com", "*.example.org"]));
        assert_eq!(scope.patterns(), ["example.com", "*.example.org"]);
    }
}
