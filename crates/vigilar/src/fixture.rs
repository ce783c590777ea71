//! Scenario fixtures: tracing init and the browser session harness.

use crate::config::DashboardConfig;
use crate::result::VigilarResult;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialise tracing once per process. Honours `RUST_LOG`; defaults to
/// `vigilar=info`. Safe to call from every test.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("vigilar=info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Prepare the screenshot output directory from the config
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn prepare_screenshot_dir(config: &DashboardConfig) -> VigilarResult<()> {
    std::fs::create_dir_all(config.screenshot_dir())?;
    Ok(())
}

/// A live browser session: one browser, one dashboard page.
///
/// Scenarios create a fresh harness each so they stay independent; the
/// browser is closed in [`Harness::finish`] regardless of verdict.
#[cfg(feature = "browser")]
pub struct Harness {
    browser: crate::browser::Browser,
    /// The dashboard page under test
    pub page: crate::page::CdpDashboardPage,
}

#[cfg(feature = "browser")]
impl Harness {
    /// Launch a browser, open the dashboard, and wait for data
    ///
    /// # Errors
    ///
    /// Returns an error if launch, navigation, or the data wait fails.
    pub async fn start(config: DashboardConfig) -> VigilarResult<Self> {
        use crate::facade::PageFacade;

        init_tracing();
        prepare_screenshot_dir(&config)?;
        let browser = crate::browser::Browser::launch(&config).await?;
        let mut page = crate::page::CdpDashboardPage::new(&browser, config).await?;
        page.open().await?;
        page.wait_for_data().await?;
        Ok(Self { browser, page })
    }

    /// Close the browser, releasing the session
    ///
    /// # Errors
    ///
    /// Returns an error if browser shutdown fails.
    pub async fn finish(self) -> VigilarResult<()> {
        self.browser.close().await
    }
}
