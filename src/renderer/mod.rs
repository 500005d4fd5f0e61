//! Headless-Chromium page rendering.
//!
//! The storefront fills its listing grids and attribute tables client-side,
//! so every fetch goes through a real browser: navigate, wait for the
//! page's marker element, capture the rendered markup.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Rendering failures the pipeline can report per page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("navigation to {url} failed")]
    Navigation {
        url: String,
        #[source]
        source: CdpError,
    },

    #[error("timed out after {timeout_secs}s waiting for `{marker}` on {url}")]
    MarkerTimeout { url: String, marker: String, timeout_secs: u64 },
}

/// Trait for rendered page fetching - enables mocking for tests.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Navigates to `url`, waits until an element matching `marker`
    /// exists, and returns the rendered markup.
    async fn render(&self, url: &str, marker: &str) -> Result<String>;
}

/// Renderer backed by a single headless Chromium instance.
///
/// The browser is an exclusively-owned resource for the whole run; the
/// caller must await [`ChromeRenderer::shutdown`] on every exit path so
/// the Chromium process is reaped even when the run fails.
#[derive(Debug)]
pub struct ChromeRenderer {
    browser: Browser,
    handler_task: JoinHandle<()>,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl ChromeRenderer {
    /// Launches Chromium from the configured binary path.
    ///
    /// There is no fallback: a missing binary is a startup error.
    pub async fn launch(config: &Config) -> Result<Self> {
        let chrome = &config.chrome_binary;
        if !chrome.exists() {
            anyhow::bail!("Chromium binary not found at {}", chrome.display());
        }

        debug!("Launching Chromium from {}", chrome.display());

        let browser_config = BrowserConfig::builder()
            .chrome_executable(chrome)
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid browser configuration: {e}"))?;

        let (browser, mut handler) =
            Browser::launch(browser_config).await.context("Failed to launch Chromium")?;

        // Drive the CDP event stream for the lifetime of the browser
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
            poll_interval: Duration::from_millis(250),
        })
    }

    /// Closes the browser and reaps the Chromium process.
    pub async fn shutdown(mut self) -> Result<()> {
        debug!("Shutting down Chromium");
        self.browser.close().await.context("Failed to close browser")?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }
}

impl ChromeRenderer {
    /// Waits for the marker element and captures the markup. Split out
    /// of `render` so the tab can be closed no matter how this went.
    async fn capture(&self, page: &Page, url: &str, marker: &str) -> Result<String> {
        // Poll for the marker element, bounded by the configured timeout
        let wait = async {
            loop {
                if page.find_element(marker).await.is_ok() {
                    break;
                }
                trace!("Marker `{}` not present yet on {}", marker, url);
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        tokio::time::timeout(self.wait_timeout, wait).await.map_err(|_| {
            RenderError::MarkerTimeout {
                url: url.to_string(),
                marker: marker.to_string(),
                timeout_secs: self.wait_timeout.as_secs(),
            }
        })?;

        let html = page
            .content()
            .await
            .map_err(|source| RenderError::Navigation { url: url.to_string(), source })?;

        Ok(html)
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    async fn render(&self, url: &str, marker: &str) -> Result<String> {
        debug!("Rendering {}", url);

        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|source| RenderError::Navigation { url: url.to_string(), source })?;

        let result = self.capture(&page, url, marker).await;

        // The tab is closed on success and failure alike; the pipeline
        // skips failed pages and the browser lives for the whole run.
        // Tab cleanup failure is not worth failing the fetch over.
        let _ = page.close().await;

        result
    }
}
