//! Selector catalog and JavaScript query builders for the dashboard.
//!
//! Every DOM access the page facade performs goes through this module,
//! so the dashboard's markup is described in exactly one place. The
//! dashboard is a Material UI application; its structural selectors are
//! the stable `.Mui*-root` class names, and the theme toggle is found
//! by its brightness icon `data-testid`.

use serde::{Deserialize, Serialize};

/// Top application bar
pub const APP_BAR: &str = ".MuiAppBar-root";

/// The pod metrics table
pub const TABLE: &str = ".MuiTable-root";

/// Header cells, in column order
pub const HEADER_CELLS: &str = ".MuiTableHead-root .MuiTableCell-root";

/// Body rows (one pod/container per row)
pub const BODY_ROWS: &str = ".MuiTableBody-root .MuiTableRow-root";

/// Loading spinner shown while metrics are being fetched
pub const SPINNER: &str = ".MuiCircularProgress-root";

/// Surface panels (table container, summary cards)
pub const PAPER: &str = ".MuiPaper-root";

/// Theme toggle button, located by either brightness icon inside a button
pub const THEME_TOGGLE: &str =
    "button:has([data-testid=\"Brightness4Icon\"]), button:has([data-testid=\"Brightness7Icon\"])";

/// Refresh button in the app bar
pub const REFRESH_BUTTON: &str = "button:has([data-testid=\"RefreshIcon\"])";

/// Selector type for locating dashboard elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., ".MuiTable-root")
    Css(String),
    /// CSS selector filtered by contained text
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a CSS selector with a text filter
    #[must_use]
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// Convert to a JavaScript expression yielding the first match
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::CssWithText { css, text } => {
                format!(
                    "Array.from(document.querySelectorAll({css:?})).find(el => el.textContent.includes({text:?}))"
                )
            }
        }
    }

    /// Convert to a JavaScript expression counting matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::CssWithText { css, text } => {
                format!(
                    "Array.from(document.querySelectorAll({css:?})).filter(el => el.textContent.includes({text:?})).length"
                )
            }
        }
    }

    /// Convert to a JavaScript expression yielding visibility of the
    /// first match (false when the element is absent)
    #[must_use]
    pub fn to_visible_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; const r = el.getBoundingClientRect(); return r.width > 0 && r.height > 0; }})()",
            self.to_query()
        )
    }

    /// Convert to a JavaScript expression clicking the first match,
    /// yielding true on success
    #[must_use]
    pub fn to_click(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; el.click(); return true; }})()",
            self.to_query()
        )
    }

    /// Convert to a JavaScript expression yielding trimmed text content
    /// of the first match, or null
    #[must_use]
    pub fn to_text_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return el ? el.textContent.trim() : null; }})()",
            self.to_query()
        )
    }
}

/// JS: computed background colour of the document body
#[must_use]
pub fn computed_background() -> String {
    "window.getComputedStyle(document.body).backgroundColor".to_string()
}

/// JS: `data-testid` of the icon inside the theme toggle, or null
#[must_use]
pub fn toggle_icon() -> String {
    format!(
        "(() => {{ const btn = document.querySelector({THEME_TOGGLE:?}); const icon = btn ? btn.querySelector('[data-testid]') : null; return icon ? icon.getAttribute('data-testid') : null; }})()"
    )
}

/// JS: read a localStorage value, or null
#[must_use]
pub fn local_storage_get(key: &str) -> String {
    format!("window.localStorage.getItem({key:?})")
}

/// JS: write a localStorage value, yielding true
#[must_use]
pub fn local_storage_set(key: &str, value: &str) -> String {
    format!("(() => {{ window.localStorage.setItem({key:?}, {value:?}); return true; }})()")
}

/// JS: trimmed labels of every header cell, in column order
#[must_use]
pub fn header_labels() -> String {
    format!(
        "Array.from(document.querySelectorAll({HEADER_CELLS:?})).map(el => el.textContent.trim())"
    )
}

/// JS: trimmed labels of header cells carrying the click-to-sort
/// affordance (computed cursor is `pointer`)
#[must_use]
pub fn clickable_header_labels() -> String {
    format!(
        "Array.from(document.querySelectorAll({HEADER_CELLS:?})).filter(el => window.getComputedStyle(el).cursor === 'pointer').map(el => el.textContent.trim())"
    )
}

/// JS: click the first header cell whose label contains `text`,
/// yielding true when a header matched
#[must_use]
pub fn click_header_containing(text: &str) -> String {
    format!(
        "(() => {{ const el = Array.from(document.querySelectorAll({HEADER_CELLS:?})).find(el => el.textContent.includes({text:?})); if (!el) return false; el.click(); return true; }})()"
    )
}

/// JS: trimmed cell texts of one body column, top to bottom
#[must_use]
pub fn column_cells(index: usize) -> String {
    format!(
        "Array.from(document.querySelectorAll({BODY_ROWS:?})).map(row => {{ const cell = row.children[{index}]; return cell ? cell.textContent.trim() : ''; }})"
    )
}

/// JS: every body row as an array of trimmed cell texts
#[must_use]
pub fn table_rows() -> String {
    format!(
        "Array.from(document.querySelectorAll({BODY_ROWS:?})).map(row => Array.from(row.children).map(cell => cell.textContent.trim()))"
    )
}

/// JS: true when row data is present and no spinner is shown
#[must_use]
pub fn data_loaded() -> String {
    format!(
        "document.querySelectorAll({BODY_ROWS:?}).length > 0 && document.querySelectorAll({SPINNER:?}).length === 0"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_query() {
            let query = Selector::css(TABLE).to_query();
            assert!(query.contains("querySelector"));
            assert!(query.contains(".MuiTable-root"));
        }

        #[test]
        fn test_count_query() {
            let query = Selector::css(BODY_ROWS).to_count_query();
            assert!(query.contains("querySelectorAll"));
            assert!(query.contains(".length"));
        }

        #[test]
        fn test_css_with_text_query() {
            let query = Selector::css_with_text(HEADER_CELLS, "Pod Name").to_query();
            assert!(query.contains("Pod Name"));
            assert!(query.contains("textContent.includes"));
        }

        #[test]
        fn test_visible_query_guards_missing_element() {
            let query = Selector::css(SPINNER).to_visible_query();
            assert!(query.contains("if (!el) return false"));
            assert!(query.contains("getBoundingClientRect"));
        }

        #[test]
        fn test_click_yields_boolean() {
            let query = Selector::css(THEME_TOGGLE).to_click();
            assert!(query.contains("el.click()"));
            assert!(query.contains("return true"));
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_computed_background() {
            assert!(computed_background().contains("backgroundColor"));
        }

        #[test]
        fn test_local_storage_round_trip_scripts() {
            let get = local_storage_get("themeMode");
            let set = local_storage_set("themeMode", "light");
            assert!(get.contains("getItem(\"themeMode\")"));
            assert!(set.contains("setItem(\"themeMode\", \"light\")"));
        }

        #[test]
        fn test_clickable_headers_filter_on_cursor() {
            let js = clickable_header_labels();
            assert!(js.contains("cursor === 'pointer'"));
            assert!(js.contains(".MuiTableHead-root"));
        }

        #[test]
        fn test_click_header_containing() {
            let js = click_header_containing("CPU Usage");
            assert!(js.contains("CPU Usage"));
            assert!(js.contains("el.click()"));
        }

        #[test]
        fn test_column_cells_indexes_children() {
            let js = column_cells(3);
            assert!(js.contains("row.children[3]"));
        }

        #[test]
        fn test_data_loaded_requires_rows_and_no_spinner() {
            let js = data_loaded();
            assert!(js.contains(".MuiTableBody-root"));
            assert!(js.contains(".MuiCircularProgress-root"));
            assert!(js.contains("=== 0"));
        }

        #[test]
        fn test_toggle_icon_reads_testid() {
            let js = toggle_icon();
            assert!(js.contains("data-testid"));
            assert!(js.contains("Brightness"));
        }
    }
}
