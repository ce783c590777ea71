//! In-memory dashboard double.
//!
//! `ScriptedDashboard` models the dashboard's observable contract
//! (theme persistence under the `themeMode` key, the toggle, header
//! glyphs, sort cycling, row ordering) without a browser, so the whole
//! scenario suite runs under plain `cargo test`. The model deliberately
//! implements only what the real page promises; scenarios that pass
//! here and fail against chromium point at the dashboard, not the
//! suite.

use crate::result::{VigilarError, VigilarResult};
use crate::table::{
    strip_sort_glyph, ColumnDescriptor, ColumnKind, SortDirection, TableSnapshot,
};
use crate::theme::{Theme, STORAGE_KEY};
use crate::wait::TimeoutKind;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::facade::PageFacade;

/// Eight-byte PNG signature, enough for a placeholder capture
const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Column layout the dashboard renders, in order
fn dashboard_columns() -> Vec<ColumnDescriptor> {
    let names: [(&str, ColumnKind); 13] = [
        ("Pod Name", ColumnKind::Text),
        ("Container", ColumnKind::Text),
        ("Namespace", ColumnKind::Text),
        ("CPU Usage", ColumnKind::Quantity),
        ("CPU Request", ColumnKind::Quantity),
        ("CPU Limit", ColumnKind::Quantity),
        ("CPU Request %", ColumnKind::Quantity),
        ("CPU Limit %", ColumnKind::Quantity),
        ("Memory Usage", ColumnKind::Quantity),
        ("Memory Request", ColumnKind::Quantity),
        ("Memory Limit", ColumnKind::Quantity),
        ("Memory Request %", ColumnKind::Quantity),
        ("Memory Limit %", ColumnKind::Quantity),
    ];
    names
        .into_iter()
        .enumerate()
        .map(|(index, (name, kind))| ColumnDescriptor::new(name, index, true, kind))
        .collect()
}

/// Rows resembling what the metrics API serves for a small cluster.
/// Unsorted on purpose, with a few absent (`-`) limits.
fn seed_rows() -> Vec<Vec<String>> {
    let raw: [[&str; 13]; 6] = [
        ["web-frontend-7d4b9", "nginx", "default", "120m", "100m", "500m", "120%", "24%", "256Mi", "128Mi", "512Mi", "200%", "50%"],
        ["api-server-66f8c", "api", "default", "1.5", "1", "2", "150%", "75%", "1.5Gi", "1Gi", "2Gi", "150%", "75%"],
        ["cache-redis-0", "redis", "infra", "80m", "100m", "-", "80%", "-", "900Mi", "512Mi", "1Gi", "176%", "88%"],
        ["worker-batch-xz2p1", "worker", "jobs", "500m", "250m", "1", "200%", "50%", "400Mi", "256Mi", "-", "156%", "-"],
        ["db-postgres-0", "postgres", "infra", "250m", "500m", "1", "50%", "25%", "2Gi", "2Gi", "4Gi", "100%", "50%"],
        ["logging-agent-k8d7f", "fluentd", "kube-system", "30m", "50m", "100m", "60%", "30%", "150Mi", "128Mi", "256Mi", "117%", "59%"],
    ];
    raw.iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect()
}

/// Scripted in-memory dashboard page
#[derive(Debug)]
pub struct ScriptedDashboard {
    storage: HashMap<String, String>,
    displayed_theme: Theme,
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Vec<String>>,
    active_sort: Option<(usize, SortDirection)>,
    numeric_default: SortDirection,
    screenshot_dir: PathBuf,
    opened: bool,
    data_available: bool,
    toggle_broken: bool,
}

impl Default for ScriptedDashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedDashboard {
    /// Create a dashboard with the standard column layout and seed rows
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
            displayed_theme: Theme::DEFAULT,
            columns: dashboard_columns(),
            rows: seed_rows(),
            active_sort: None,
            numeric_default: SortDirection::Descending,
            screenshot_dir: std::env::temp_dir(),
            opened: false,
            data_available: true,
            toggle_broken: false,
        }
    }

    /// First click on a quantity column sorts in this direction
    #[must_use]
    pub fn with_numeric_default(mut self, direction: SortDirection) -> Self {
        self.numeric_default = direction;
        self
    }

    /// Replace the seed rows
    #[must_use]
    pub fn with_rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows = rows;
        self
    }

    /// Directory placeholder screenshots are written to
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Model a dashboard whose metrics fetch never completes
    #[must_use]
    pub fn with_data_unavailable(mut self) -> Self {
        self.data_available = false;
        self
    }

    /// Model a toggle whose click has no effect (for negative tests)
    #[must_use]
    pub fn with_broken_toggle(mut self) -> Self {
        self.toggle_broken = true;
        self
    }

    fn require_open(&self) -> VigilarResult<()> {
        if self.opened {
            Ok(())
        } else {
            Err(VigilarError::PageError {
                message: "page not opened".to_string(),
            })
        }
    }

    /// Data-loaded condition shared by the explicit wait and every data
    /// read: rows present and the metrics fetch complete.
    fn require_data(&self) -> VigilarResult<()> {
        if self.data_available && !self.rows.is_empty() {
            Ok(())
        } else {
            Err(TimeoutKind::ConditionNotMet.into_error("pod metrics rows", 15_000))
        }
    }

    fn find_column_index(&self, name: &str) -> VigilarResult<usize> {
        self.columns
            .iter()
            .position(|col| col.name.contains(name))
            .ok_or_else(|| VigilarError::not_found(format!("column header matching {name:?}")))
    }

    fn persist_theme(&mut self) {
        self.storage
            .insert(STORAGE_KEY.to_string(), self.displayed_theme.as_str().to_string());
    }

    fn apply_sort(&mut self) {
        let Some((index, direction)) = self.active_sort else {
            return;
        };
        let kind = self.columns[index].kind;
        self.rows.sort_by(|a, b| {
            let left = a.get(index).map(String::as_str).unwrap_or("");
            let right = b.get(index).map(String::as_str).unwrap_or("");
            compare_cells(left, right, kind, direction)
        });
    }
}

/// Cell comparison used by the model's re-sort. Absent quantities sort
/// after every present value in both directions, matching how the
/// dashboard renders `-` cells.
fn compare_cells(a: &str, b: &str, kind: ColumnKind, direction: SortDirection) -> Ordering {
    let order = match kind {
        ColumnKind::Text => a.to_lowercase().cmp(&b.to_lowercase()),
        ColumnKind::Quantity => {
            match (
                crate::table::parse_quantity(a),
                crate::table::parse_quantity(b),
            ) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => return Ordering::Equal,
            }
        }
    };
    match direction {
        SortDirection::Ascending => order,
        SortDirection::Descending => order.reverse(),
    }
}

#[async_trait]
impl PageFacade for ScriptedDashboard {
    async fn open(&mut self) -> VigilarResult<()> {
        self.opened = true;
        // Displayed theme follows the persisted preference, defaulting to dark
        self.displayed_theme = self
            .storage
            .get(STORAGE_KEY)
            .and_then(|s| s.parse().ok())
            .unwrap_or(Theme::DEFAULT);
        // Sort state does not survive navigation
        self.active_sort = None;
        Ok(())
    }

    async fn reload(&mut self) -> VigilarResult<()> {
        self.require_open()?;
        // Storage survives; everything derived from the DOM resets
        self.open().await
    }

    async fn wait_for_data(&mut self) -> VigilarResult<()> {
        self.require_open()?;
        self.require_data()
    }

    async fn current_theme(&mut self) -> VigilarResult<Theme> {
        self.require_open()?;
        Ok(self.displayed_theme)
    }

    async fn toggle_theme(&mut self) -> VigilarResult<()> {
        self.require_open()?;
        if self.toggle_broken {
            return Ok(());
        }
        self.displayed_theme = self.displayed_theme.toggled();
        self.persist_theme();
        Ok(())
    }

    async fn stored_theme(&mut self) -> VigilarResult<Option<Theme>> {
        Ok(self.storage.get(STORAGE_KEY).and_then(|s| s.parse().ok()))
    }

    async fn store_theme(&mut self, theme: Theme) -> VigilarResult<()> {
        self.storage
            .insert(STORAGE_KEY.to_string(), theme.as_str().to_string());
        Ok(())
    }

    async fn columns(&mut self) -> VigilarResult<Vec<ColumnDescriptor>> {
        self.require_open()?;
        Ok(self.columns.clone())
    }

    async fn click_column_header(&mut self, name: &str) -> VigilarResult<()> {
        self.require_open()?;
        let index = self.find_column_index(name)?;
        let direction = match self.active_sort {
            // Same column: cycle direction, never back to unsorted
            Some((active, direction)) if active == index => direction.toggled(),
            // New column: previous sort cleared, column-kind default applies
            _ => match self.columns[index].kind {
                ColumnKind::Text => SortDirection::Ascending,
                ColumnKind::Quantity => self.numeric_default,
            },
        };
        self.active_sort = Some((index, direction));
        self.apply_sort();
        Ok(())
    }

    async fn header_label(&mut self, name: &str) -> VigilarResult<String> {
        self.require_open()?;
        let index = self.find_column_index(name)?;
        let clean = strip_sort_glyph(&self.columns[index].name);
        match self.active_sort {
            Some((active, direction)) if active == index => {
                Ok(format!("{clean} {}", direction.glyph()))
            }
            _ => Ok(clean),
        }
    }

    async fn column_data(&mut self, index: usize) -> VigilarResult<Vec<String>> {
        self.require_open()?;
        self.require_data()?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| row.get(index).cloned())
            .collect())
    }

    async fn table_snapshot(&mut self) -> VigilarResult<TableSnapshot> {
        self.require_open()?;
        self.require_data()?;
        Ok(TableSnapshot::new(self.rows.clone()))
    }

    async fn refresh(&mut self) -> VigilarResult<()> {
        self.require_open()?;
        self.wait_for_data().await
    }

    async fn has_panel(&mut self) -> VigilarResult<bool> {
        self.require_open()?;
        Ok(true)
    }

    async fn capture_screenshot(&mut self, name: &str) -> VigilarResult<PathBuf> {
        self.require_open()?;
        std::fs::create_dir_all(&self.screenshot_dir)?;
        let path = self.screenshot_dir.join(format!("{name}.png"));
        std::fs::write(&path, PNG_SIGNATURE)?;
        Ok(path)
    }
}
