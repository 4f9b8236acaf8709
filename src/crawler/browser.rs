//! Headless browser fetching for JavaScript-rendered sites
//!
//! Only compiled with the `render` feature. One Chromium process serves the
//! whole crawl; each fetch opens its own tab and closes it afterwards.

use crate::crawler::{FetchFailure, Fetcher};
use crate::RufusError;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use url::Url;

/// Fetches pages by rendering them in headless Chromium
///
/// The browser cannot observe the HTTP status of the main document, so this
/// fetcher only ever reports [`FetchFailure::Timeout`] or
/// [`FetchFailure::Transport`].
pub struct BrowserFetcher {
    browser: Browser,
    handler: JoinHandle<()>,
    timeout: Duration,
}

impl BrowserFetcher {
    /// Launches a headless browser and starts its event loop
    pub async fn launch(timeout: Duration) -> Result<Self, RufusError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(RufusError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RufusError::Browser(e.to_string()))?;

        // Drive browser events until the connection goes away
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!("Launched headless browser for dynamic fetching");

        Ok(Self {
            browser,
            handler,
            timeout,
        })
    }

    /// Loads `url` in a fresh tab and returns the rendered document
    ///
    /// Only navigation and content capture count against the timeout. The tab
    /// is closed on every path, including when the timeout fires.
    async fn render(&self, url: &Url) -> Result<String, FetchFailure> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let load = async {
            page.goto(url.as_str())
                .await
                .map_err(|e| FetchFailure::Transport(e.to_string()))?;
            page.content()
                .await
                .map_err(|e| FetchFailure::Transport(e.to_string()))
        };

        let content = match tokio::time::timeout(self.timeout, load).await {
            Ok(result) => result,
            Err(_) => Err(FetchFailure::Timeout),
        };

        if let Err(e) = page.close().await {
            debug!("Failed to close tab for {}: {}", url, e);
        }

        content
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchFailure> {
        self.render(url).await
    }
}

impl Drop for BrowserFetcher {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    #[ignore = "needs a local Chromium"]
    async fn test_timed_out_fetch_closes_its_tab() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>late</body></html>")
                    .insert_header("content-type", "text/html")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let fetcher = BrowserFetcher::launch(Duration::from_millis(500))
            .await
            .unwrap();
        let before = fetcher.browser.pages().await.unwrap().len();

        let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();
        for _ in 0..3 {
            let result = fetcher.fetch(&url).await;
            assert!(matches!(result, Err(FetchFailure::Timeout)));
        }

        let after = fetcher.browser.pages().await.unwrap().len();
        assert_eq!(after, before);
    }
}
