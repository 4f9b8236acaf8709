//! Page fetching
//!
//! This module defines the fetch adapter boundary the crawl engine talks to:
//! - `Fetcher`, the capability trait every page source implements
//! - `FetchFailure`, the closed set of ways a fetch can fail
//! - `HttpFetcher`, the plain HTTP implementation on top of reqwest
//!
//! A fetcher never panics or returns anything but `Ok(html)` or
//! `Err(FetchFailure)`. The engine prunes the branch on any failure.

use crate::config::{Config, UserAgentConfig, DEFAULT_FETCH_TIMEOUT_SECS};
use crate::RufusError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum number of redirects followed by the HTTP fetcher
const MAX_REDIRECTS: usize = 10;

/// Why a page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The fetch did not complete within its timeout
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status
    #[error("HTTP status {0}")]
    BadStatus(u16),

    /// DNS, connection, TLS, body decoding or rendering failure
    #[error("transport error: {0}")]
    Transport(String),
}

/// A source of raw page HTML
///
/// Implementations must bound every fetch with a timeout and report it as
/// [`FetchFailure::Timeout`] rather than hanging.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchFailure>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Bound on a whole request, connection through body
///
/// # Example
///
/// ```no_run
/// use rufus::config::UserAgentConfig;
/// use rufus::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over plain HTTP(S)
///
/// Only 2xx responses count as success; their body is returned as text.
/// Redirects are followed by the client itself.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Builds a fetcher with its own client
    pub fn from_config(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config, timeout)?, timeout))
    }

    /// Builds a fetcher with the default user agent and timeout
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::from_config(
            &UserAgentConfig::default(),
            Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn get(&self, url: &Url) -> Result<String, FetchFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::BadStatus(status.as_u16()));
        }

        response.text().await.map_err(classify_error)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchFailure> {
        // The client timeout covers the request; this also covers slow bodies
        // on clients built elsewhere without one.
        match tokio::time::timeout(self.timeout, self.get(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchFailure::Timeout),
        }
    }
}

/// Maps a reqwest error onto the fetch failure taxonomy
fn classify_error(error: reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else if let Some(status) = error.status() {
        FetchFailure::BadStatus(status.as_u16())
    } else {
        FetchFailure::Transport(error.to_string())
    }
}

/// Selects the fetcher named by the configuration
///
/// `crawler.dynamic = true` launches a headless browser (requires the
/// `render` feature); otherwise pages are fetched over plain HTTP.
pub async fn build_fetcher(config: &Config) -> Result<Arc<dyn Fetcher>, RufusError> {
    let timeout = config.crawler.fetch_timeout();

    if config.crawler.dynamic {
        return launch_browser(timeout).await;
    }

    Ok(Arc::new(HttpFetcher::from_config(&config.user_agent, timeout)?))
}

#[cfg(feature = "render")]
async fn launch_browser(timeout: Duration) -> Result<Arc<dyn Fetcher>, RufusError> {
    let fetcher = crate::crawler::browser::BrowserFetcher::launch(timeout).await?;
    Ok(Arc::new(fetcher))
}

#[cfg(not(feature = "render"))]
async fn launch_browser(_timeout: Duration) -> Result<Arc<dyn Fetcher>, RufusError> {
    Err(crate::ConfigError::Validation(
        "dynamic fetching requires building with the `render` feature".to_string(),
    )
    .into())
}
