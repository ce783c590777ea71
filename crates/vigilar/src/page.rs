//! Live dashboard page over CDP.
//!
//! Implements [`PageFacade`] against a real chromium instance. Column
//! kinds are inferred from the header label: anything mentioning CPU,
//! memory, or a percent sign compares as a quantity, everything else as
//! text.

use crate::browser::{Browser, Page};
use crate::catalog::{self, Selector};
use crate::config::DashboardConfig;
use crate::facade::PageFacade;
use crate::result::{VigilarError, VigilarResult};
use crate::table::{
    direction_from_label, strip_sort_glyph, ColumnDescriptor, ColumnKind, SortDirection,
    TableSnapshot,
};
use crate::theme::{Theme, STORAGE_KEY};
use crate::wait::{poll_until, TimeoutKind, WaitOptions};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// [`PageFacade`] implementation backed by chromium
#[derive(Debug)]
pub struct CdpDashboardPage {
    config: DashboardConfig,
    page: Page,
}

impl CdpDashboardPage {
    /// Open a page in the given browser (does not navigate yet)
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be created.
    pub async fn new(browser: &Browser, config: DashboardConfig) -> VigilarResult<Self> {
        let page = browser.new_page().await?;
        Ok(Self { config, page })
    }

    fn load_options(&self) -> WaitOptions {
        WaitOptions::new(self.config.load_timeout_ms, self.config.poll_interval_ms)
    }

    fn data_options(&self) -> WaitOptions {
        WaitOptions::new(self.config.data_timeout_ms, self.config.poll_interval_ms)
    }

    /// Wait until a selector's first match is visible
    async fn wait_visible(&self, what: &str, css: &str, options: WaitOptions) -> VigilarResult<()> {
        let selector = Selector::css(css);
        let visible = selector.to_visible_query();
        let count = selector.to_count_query();
        poll_until(
            what,
            options,
            || async {
                let shown: bool = self.page.eval(&visible).await?;
                Ok(shown)
            },
            || async {
                match self.page.eval::<u64>(&count).await {
                    Ok(0) | Err(_) => TimeoutKind::ElementMissing,
                    Ok(_) => TimeoutKind::ConditionNotMet,
                }
            },
        )
        .await
    }

    /// Wait for the page-loaded condition: app bar and table visible
    async fn wait_for_load(&self) -> VigilarResult<()> {
        self.wait_visible("app bar", catalog::APP_BAR, self.load_options())
            .await?;
        self.wait_visible("pod metrics table", catalog::TABLE, self.load_options())
            .await
    }

    /// Wait for the data-loaded condition: at least one body row and no
    /// loading spinner. Shared by the explicit wait and every data read.
    async fn await_data(&self) -> VigilarResult<()> {
        let loaded = catalog::data_loaded();
        let rows = Selector::css(catalog::BODY_ROWS).to_count_query();
        let page = &self.page;
        poll_until(
            "pod metrics rows",
            self.data_options(),
            || async {
                let ready: bool = page.eval(&loaded).await?;
                Ok(ready)
            },
            || async {
                match page.eval::<u64>(&rows).await {
                    Ok(0) | Err(_) => TimeoutKind::ElementMissing,
                    Ok(_) => TimeoutKind::ConditionNotMet,
                }
            },
        )
        .await
    }

    fn infer_kind(name: &str) -> ColumnKind {
        if name.contains("CPU") || name.contains("Memory") || name.contains('%') {
            ColumnKind::Quantity
        } else {
            ColumnKind::Text
        }
    }
}

#[async_trait]
impl PageFacade for CdpDashboardPage {
    async fn open(&mut self) -> VigilarResult<()> {
        let url = self.config.base_url.clone();
        self.page.goto(&url).await?;
        self.wait_for_load().await?;
        debug!(url, "dashboard loaded");
        Ok(())
    }

    async fn reload(&mut self) -> VigilarResult<()> {
        self.page.reload().await?;
        self.wait_for_load().await
    }

    async fn wait_for_data(&mut self) -> VigilarResult<()> {
        self.await_data().await
    }

    async fn current_theme(&mut self) -> VigilarResult<Theme> {
        let background: String = self.page.eval(&catalog::computed_background()).await?;
        if let Some(theme) = Theme::from_background(&background) {
            return Ok(theme);
        }
        // Colour matched neither palette; fall back to the toggle icon
        let icon: Option<String> = self.page.eval(&catalog::toggle_icon()).await?;
        icon.as_deref()
            .and_then(Theme::from_toggle_icon)
            .ok_or_else(|| VigilarError::PageError {
                message: format!(
                    "cannot classify theme: background {background:?}, toggle icon {icon:?}"
                ),
            })
    }

    async fn toggle_theme(&mut self) -> VigilarResult<()> {
        let clicked: bool = self
            .page
            .eval(&Selector::css(catalog::THEME_TOGGLE).to_click())
            .await?;
        if !clicked {
            return Err(VigilarError::not_found("theme toggle button"));
        }
        // Palette transition has no DOM completion signal
        tokio::time::sleep(self.config.theme_settle()).await;
        Ok(())
    }

    async fn stored_theme(&mut self) -> VigilarResult<Option<Theme>> {
        let raw: Option<String> = self
            .page
            .eval(&catalog::local_storage_get(STORAGE_KEY))
            .await
            .map_err(|e| VigilarError::StorageError {
                message: e.to_string(),
            })?;
        Ok(raw.and_then(|s| s.parse().ok()))
    }

    async fn store_theme(&mut self, theme: Theme) -> VigilarResult<()> {
        let _: bool = self
            .page
            .eval(&catalog::local_storage_set(STORAGE_KEY, theme.as_str()))
            .await
            .map_err(|e| VigilarError::StorageError {
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn columns(&mut self) -> VigilarResult<Vec<ColumnDescriptor>> {
        let labels: Vec<String> = self.page.eval(&catalog::header_labels()).await?;
        let clickable: Vec<String> = self.page.eval(&catalog::clickable_header_labels()).await?;
        Ok(labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let name = strip_sort_glyph(label);
                let sortable = clickable.iter().any(|c| strip_sort_glyph(c) == name);
                let kind = Self::infer_kind(&name);
                ColumnDescriptor::new(name, index, sortable, kind)
            })
            .collect())
    }

    async fn click_column_header(&mut self, name: &str) -> VigilarResult<()> {
        let clicked: bool = self
            .page
            .eval(&catalog::click_header_containing(name))
            .await?;
        if !clicked {
            return Err(VigilarError::not_found(format!(
                "column header matching {name:?}"
            )));
        }
        // Re-sort has no DOM completion signal
        tokio::time::sleep(self.config.sort_settle()).await;
        Ok(())
    }

    async fn header_label(&mut self, name: &str) -> VigilarResult<String> {
        let labels: Vec<String> = self.page.eval(&catalog::header_labels()).await?;
        labels
            .into_iter()
            .find(|label| strip_sort_glyph(label).contains(name))
            .ok_or_else(|| VigilarError::not_found(format!("column header matching {name:?}")))
    }

    async fn sort_direction_of(&mut self, name: &str) -> VigilarResult<Option<SortDirection>> {
        let label = self.header_label(name).await?;
        Ok(direction_from_label(&label))
    }

    async fn column_data(&mut self, index: usize) -> VigilarResult<Vec<String>> {
        self.await_data().await?;
        self.page.eval(&catalog::column_cells(index)).await
    }

    async fn table_snapshot(&mut self) -> VigilarResult<TableSnapshot> {
        self.await_data().await?;
        let rows: Vec<Vec<String>> = self.page.eval(&catalog::table_rows()).await?;
        Ok(TableSnapshot::new(rows))
    }

    async fn refresh(&mut self) -> VigilarResult<()> {
        let clicked: bool = self
            .page
            .eval(&Selector::css(catalog::REFRESH_BUTTON).to_click())
            .await?;
        if !clicked {
            return Err(VigilarError::not_found("refresh button"));
        }
        self.wait_for_data().await
    }

    async fn has_panel(&mut self) -> VigilarResult<bool> {
        let count: u64 = self
            .page
            .eval(&Selector::css(catalog::PAPER).to_count_query())
            .await?;
        Ok(count > 0)
    }

    async fn capture_screenshot(&mut self, name: &str) -> VigilarResult<PathBuf> {
        let path = self.config.screenshot_path(name);
        self.page.screenshot_to(&path).await
    }
}
