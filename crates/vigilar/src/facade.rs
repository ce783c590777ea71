//! The page facade: the only surface scenarios are written against.
//!
//! Scenarios never touch selectors or JavaScript directly; they speak
//! in dashboard vocabulary (themes, columns, rows) through this trait.
//! Two implementations exist: [`crate::mock::ScriptedDashboard`], an
//! in-memory model used by the default test suite, and the
//! chromiumoxide-backed page behind the `browser` feature.

use crate::result::VigilarResult;
use crate::table::{ColumnDescriptor, SortDirection, TableSnapshot};
use crate::theme::Theme;
use async_trait::async_trait;
use std::path::PathBuf;

/// Operations every dashboard page implementation provides
#[async_trait]
pub trait PageFacade: Send {
    /// Navigate to the dashboard and wait for the page-loaded condition
    /// (app bar and table visible).
    async fn open(&mut self) -> VigilarResult<()>;

    /// Reload the current page and wait for the page-loaded condition.
    /// Persisted storage survives the reload.
    async fn reload(&mut self) -> VigilarResult<()>;

    /// Wait for the data-loaded condition: at least one body row and no
    /// loading spinner.
    async fn wait_for_data(&mut self) -> VigilarResult<()>;

    /// The currently displayed theme, classified from the computed
    /// background colour with the toggle icon as fallback.
    async fn current_theme(&mut self) -> VigilarResult<Theme>;

    /// Activate the theme toggle once and let the transition settle
    async fn toggle_theme(&mut self) -> VigilarResult<()>;

    /// The persisted theme preference, if any
    async fn stored_theme(&mut self) -> VigilarResult<Option<Theme>>;

    /// Persist a theme preference directly (arrange step for
    /// persistence scenarios)
    async fn store_theme(&mut self, theme: Theme) -> VigilarResult<()>;

    /// Columns observed in the table header, in order
    async fn columns(&mut self) -> VigilarResult<Vec<ColumnDescriptor>>;

    /// Click the header whose label contains `name` and let the re-sort
    /// settle. Fails with `NotFound` when no header matches.
    async fn click_column_header(&mut self, name: &str) -> VigilarResult<()>;

    /// The rendered label of the header whose clean name contains
    /// `name`, glyph included. Fails with `NotFound` when no header
    /// matches.
    async fn header_label(&mut self, name: &str) -> VigilarResult<String>;

    /// Sort direction the named column's header communicates, or `None`
    /// when the column is not the active sort column.
    async fn sort_direction_of(&mut self, name: &str) -> VigilarResult<Option<SortDirection>> {
        let label = self.header_label(name).await?;
        Ok(crate::table::direction_from_label(&label))
    }

    /// Cell texts of one body column, top to bottom
    async fn column_data(&mut self, index: usize) -> VigilarResult<Vec<String>>;

    /// Capture the whole table body
    async fn table_snapshot(&mut self) -> VigilarResult<TableSnapshot>;

    /// Activate the refresh control and wait for data to reload
    async fn refresh(&mut self) -> VigilarResult<()>;

    /// Whether at least one surface panel is rendered
    async fn has_panel(&mut self) -> VigilarResult<bool>;

    /// Capture a screenshot, returning the path written
    async fn capture_screenshot(&mut self, name: &str) -> VigilarResult<PathBuf>;
}

/// Toggle until the displayed theme matches `desired` (arrange helper;
/// at most one activation is ever needed).
pub async fn ensure_theme<P: PageFacade + ?Sized>(
    page: &mut P,
    desired: Theme,
) -> VigilarResult<()> {
    if page.current_theme().await? != desired {
        page.toggle_theme().await?;
    }
    Ok(())
}

/// Find a column descriptor whose name contains `name` (first match in
/// column order).
pub async fn find_column<P: PageFacade + ?Sized>(
    page: &mut P,
    name: &str,
) -> VigilarResult<ColumnDescriptor> {
    let columns = page.columns().await?;
    columns
        .into_iter()
        .find(|col| col.name.contains(name))
        .ok_or_else(|| crate::result::VigilarError::not_found(format!("column matching {name:?}")))
}
