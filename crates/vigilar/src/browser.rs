//! Chromium control over CDP (Chrome `DevTools` Protocol).
//!
//! Thin wrapper over chromiumoxide: launch, page lifecycle, typed
//! JavaScript evaluation, and PNG screenshots. The dashboard-aware
//! logic lives in [`crate::page`]; this layer knows nothing about
//! themes or tables.

use crate::config::DashboardConfig;
use crate::result::{VigilarError, VigilarResult};
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// A launched chromium instance
#[derive(Debug)]
pub struct Browser {
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch chromium per the session config
    ///
    /// # Errors
    ///
    /// Returns [`VigilarError::BrowserLaunchError`] if the browser
    /// cannot be launched.
    pub async fn launch(config: &DashboardConfig) -> VigilarResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        let cdp_config = builder
            .build()
            .map_err(|e| VigilarError::BrowserLaunchError {
                message: e.to_string(),
            })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| VigilarError::BrowserLaunchError {
                    message: e.to_string(),
                })?;

        // Drive the CDP event loop until the connection drops
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!(
            headless = config.headless,
            width = config.viewport_width,
            height = config.viewport_height,
            "browser launched"
        );

        Ok(Self {
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a new blank page
    ///
    /// # Errors
    ///
    /// Returns [`VigilarError::PageError`] if the page cannot be created.
    pub async fn new_page(&self) -> VigilarResult<Page> {
        let browser = self.inner.lock().await;
        let cdp_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| VigilarError::PageError {
                message: e.to_string(),
            })?;
        Ok(Page {
            url: String::from("about:blank"),
            inner: Arc::new(Mutex::new(cdp_page)),
        })
    }

    /// Close the browser
    ///
    /// # Errors
    ///
    /// Returns [`VigilarError::BrowserLaunchError`] if shutdown fails.
    pub async fn close(self) -> VigilarResult<()> {
        let mut browser = self.inner.lock().await;
        browser
            .close()
            .await
            .map_err(|e| VigilarError::BrowserLaunchError {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// A live browser page
#[derive(Debug)]
pub struct Page {
    url: String,
    inner: Arc<Mutex<CdpPage>>,
}

impl Page {
    /// Navigate to a URL and wait for the navigation to commit
    ///
    /// # Errors
    ///
    /// Returns [`VigilarError::NavigationError`] if navigation fails.
    pub async fn goto(&mut self, url: &str) -> VigilarResult<()> {
        {
            let page = self.inner.lock().await;
            page.goto(url)
                .await
                .map_err(|e| VigilarError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
        }
        self.url = url.to_string();
        debug!(url, "navigated");
        Ok(())
    }

    /// Reload the current page
    ///
    /// # Errors
    ///
    /// Returns [`VigilarError::NavigationError`] if the reload fails.
    pub async fn reload(&mut self) -> VigilarResult<()> {
        let page = self.inner.lock().await;
        page.reload()
            .await
            .map_err(|e| VigilarError::NavigationError {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Evaluate a JavaScript expression, deserializing the result
    ///
    /// # Errors
    ///
    /// Returns [`VigilarError::EvalError`] if evaluation or
    /// deserialization fails.
    pub async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> VigilarResult<T> {
        let page = self.inner.lock().await;
        let result = page
            .evaluate(expr)
            .await
            .map_err(|e| VigilarError::EvalError {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| VigilarError::EvalError {
            message: e.to_string(),
        })
    }

    /// Capture a full-page PNG screenshot and write it to `path`
    ///
    /// # Errors
    ///
    /// Returns [`VigilarError::ScreenshotError`] if capture or decoding
    /// fails, or an I/O error if the file cannot be written.
    pub async fn screenshot_to(&self, path: &Path) -> VigilarResult<PathBuf> {
        let bytes = {
            let page = self.inner.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .capture_beyond_viewport(true)
                .build();
            let screenshot =
                page.execute(params)
                    .await
                    .map_err(|e| VigilarError::ScreenshotError {
                        message: e.to_string(),
                    })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| VigilarError::ScreenshotError {
                    message: e.to_string(),
                })?
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;
        debug!(path = %path.display(), "screenshot written");
        Ok(path.to_path_buf())
    }

    /// Current URL as last navigated
    #[must_use]
    pub fn current_url(&self) -> &str {
        &self.url
    }
}
