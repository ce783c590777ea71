//! Explicit configuration for dashboard sessions.
//!
//! Everything a scenario needs (base URL, viewport, timeouts, settle
//! intervals, screenshot output) lives in one struct handed to the page
//! facade at construction time. Nothing reads the environment at use
//! sites; `from_env` is the single place where `BASE_URL` is honoured.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default dashboard URL for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default timeout for the page-loaded condition (table visible)
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 10_000;

/// Default timeout for the data-loaded condition (rows present, spinner gone)
pub const DEFAULT_DATA_TIMEOUT_MS: u64 = 15_000;

/// Default polling interval for bounded waits
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Settle interval after a theme toggle. The dashboard animates the
/// palette transition and exposes no DOM signal for its completion, so
/// this fixed wait is the documented degraded mode; it must be at least
/// as long as the transition animation.
pub const THEME_SETTLE_MS: u64 = 500;

/// Settle interval after a header click (re-sort has no completion signal)
pub const SORT_SETTLE_MS: u64 = 300;

/// Configuration for a dashboard test session
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Dashboard base URL
    pub base_url: String,
    /// Run the browser headless
    pub headless: bool,
    /// Sandbox mode (disable for containers/CI)
    pub sandbox: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Directory screenshots are written to
    pub screenshot_dir: PathBuf,
    /// Timeout for the page-loaded condition
    pub load_timeout_ms: u64,
    /// Timeout for the data-loaded condition
    pub data_timeout_ms: u64,
    /// Polling interval for bounded waits
    pub poll_interval_ms: u64,
    /// Settle interval after a theme toggle
    pub theme_settle_ms: u64,
    /// Settle interval after a header click
    pub sort_settle_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            sandbox: true,
            viewport_width: 1280,
            viewport_height: 720,
            screenshot_dir: PathBuf::from("screenshots"),
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
            data_timeout_ms: DEFAULT_DATA_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            theme_settle_ms: THEME_SETTLE_MS,
            sort_settle_ms: SORT_SETTLE_MS,
        }
    }
}

impl DashboardConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with defaults, honouring the `BASE_URL`
    /// environment variable if set
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("BASE_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        config
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Disable the sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the screenshot output directory
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Set the page-load timeout
    #[must_use]
    pub const fn with_load_timeout(mut self, ms: u64) -> Self {
        self.load_timeout_ms = ms;
        self
    }

    /// Set the data-load timeout
    #[must_use]
    pub const fn with_data_timeout(mut self, ms: u64) -> Self {
        self.data_timeout_ms = ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Poll interval as a Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Theme settle interval as a Duration
    #[must_use]
    pub const fn theme_settle(&self) -> Duration {
        Duration::from_millis(self.theme_settle_ms)
    }

    /// Sort settle interval as a Duration
    #[must_use]
    pub const fn sort_settle(&self) -> Duration {
        Duration::from_millis(self.sort_settle_ms)
    }

    /// Path a named screenshot will be written to
    #[must_use]
    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        self.screenshot_dir.join(format!("{name}.png"))
    }

    /// Screenshot directory as a Path
    #[must_use]
    pub fn screenshot_dir(&self) -> &Path {
        &self.screenshot_dir
    }
}
