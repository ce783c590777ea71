//! Table model: columns, sort state, snapshots, and quantity parsing.
//!
//! The dashboard renders one sortable table of pod metrics. Sort state
//! is communicated entirely through the rendered header label: an
//! active column carries a trailing ↑ or ↓ glyph, and at most one
//! column is active at a time. Quantity columns encode magnitudes with
//! unit suffixes (CPU millicores like `250m`, memory scale suffixes
//! like `1.5Gi`), so ordering checks must compare unit-aware values,
//! not raw strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Glyph appended to an ascending-sorted header label
pub const ASCENDING_GLYPH: &str = "↑";

/// Glyph appended to a descending-sorted header label
pub const DESCENDING_GLYPH: &str = "↓";

/// Direction of an active column sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// The direction one more click on the same header produces.
    ///
    /// The dashboard cycles ascending → descending and back; it never
    /// returns an active column to the unsorted state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Glyph the header renders for this direction
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Ascending => ASCENDING_GLYPH,
            Self::Descending => DESCENDING_GLYPH,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

/// Comparison semantics of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Case-insensitive lexicographic comparison
    Text,
    /// Unit-aware numeric comparison (see [`parse_quantity`])
    Quantity,
}

/// A table column as observed on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Header label with any sort glyph stripped
    pub name: String,
    /// Zero-based column position
    pub index: usize,
    /// Whether the header carries the click-to-sort affordance
    pub sortable: bool,
    /// Comparison semantics
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    /// Create a descriptor
    #[must_use]
    pub fn new(name: impl Into<String>, index: usize, sortable: bool, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            index,
            sortable,
            kind,
        }
    }
}

/// An immutable capture of the table body: ordered rows of trimmed
/// cell text, taken after the data-loaded wait condition held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    rows: Vec<Vec<String>>,
}

impl TableSnapshot {
    /// Capture a snapshot, trimming every cell
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.trim().to_string()).collect())
            .collect();
        Self { rows }
    }

    /// Number of rows captured
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All rows, in table order
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cell texts of one column, skipping rows too short to have it
    #[must_use]
    pub fn column(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).cloned())
            .collect()
    }

    /// True when no rows were captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Strip a trailing sort glyph (and the space before it) from a header
/// label, returning the clean column name.
#[must_use]
pub fn strip_sort_glyph(label: &str) -> String {
    label
        .trim_end_matches(ASCENDING_GLYPH)
        .trim_end_matches(DESCENDING_GLYPH)
        .trim()
        .to_string()
}

/// Read the sort direction a rendered header label communicates, if any
#[must_use]
pub fn direction_from_label(label: &str) -> Option<SortDirection> {
    if label.contains(ASCENDING_GLYPH) {
        Some(SortDirection::Ascending)
    } else if label.contains(DESCENDING_GLYPH) {
        Some(SortDirection::Descending)
    } else {
        None
    }
}

/// Parse a quantity cell into a comparable magnitude.
///
/// Handles the dashboard's cell formats:
/// - CPU: `250m` (millicores, 0.25 cores), `1.5` (cores)
/// - Memory: `512Ki`, `100Mi`, `1.5Gi`, `2Ti` (binary scale suffixes)
/// - Percentages: `85%`
///
/// Returns `None` for `-` and empty/whitespace cells, which the
/// dashboard uses for absent limits/requests; callers exclude those
/// from ordering checks rather than treating them as parse failures.
#[must_use]
pub fn parse_quantity(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }

    let (number, scale) = split_unit(trimmed);
    let value: f64 = number.parse().ok()?;
    Some(value * scale)
}

fn split_unit(s: &str) -> (&str, f64) {
    const BINARY_SUFFIXES: [(&str, f64); 4] = [
        ("Ki", 1024.0),
        ("Mi", 1024.0 * 1024.0),
        ("Gi", 1024.0 * 1024.0 * 1024.0),
        ("Ti", 1024.0 * 1024.0 * 1024.0 * 1024.0),
    ];

    for (suffix, scale) in BINARY_SUFFIXES {
        if let Some(number) = s.strip_suffix(suffix) {
            return (number.trim_end(), scale);
        }
    }
    if let Some(number) = s.strip_suffix('m') {
        return (number.trim_end(), 1e-3);
    }
    if let Some(number) = s.strip_suffix('%') {
        return (number.trim_end(), 1.0);
    }
    (s, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sort_direction_tests {
        use super::*;

        #[test]
        fn test_toggle_cycles_without_none() {
            assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
            assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
        }

        #[test]
        fn test_glyphs() {
            assert_eq!(SortDirection::Ascending.glyph(), "↑");
            assert_eq!(SortDirection::Descending.glyph(), "↓");
        }

        #[test]
        fn test_display() {
            assert_eq!(SortDirection::Ascending.to_string(), "asc");
            assert_eq!(SortDirection::Descending.to_string(), "desc");
        }
    }

    mod label_tests {
        use super::*;

        #[test]
        fn test_strip_glyph_ascending() {
            assert_eq!(strip_sort_glyph("Pod Name ↑"), "Pod Name");
        }

        #[test]
        fn test_strip_glyph_descending() {
            assert_eq!(strip_sort_glyph("CPU Usage ↓"), "CPU Usage");
        }

        #[test]
        fn test_strip_glyph_absent() {
            assert_eq!(strip_sort_glyph("Namespace"), "Namespace");
        }

        #[test]
        fn test_direction_from_label() {
            assert_eq!(
                direction_from_label("Pod Name ↑"),
                Some(SortDirection::Ascending)
            );
            assert_eq!(
                direction_from_label("Memory Usage ↓"),
                Some(SortDirection::Descending)
            );
            assert_eq!(direction_from_label("Container"), None);
        }
    }

    mod quantity_tests {
        use super::*;

        #[test]
        fn test_millicores() {
            assert_eq!(parse_quantity("250m"), Some(0.25));
            assert_eq!(parse_quantity("500m"), Some(0.5));
        }

        #[test]
        fn test_plain_cores() {
            assert_eq!(parse_quantity("1.5"), Some(1.5));
            assert_eq!(parse_quantity("2"), Some(2.0));
        }

        #[test]
        fn test_memory_suffixes() {
            assert_eq!(parse_quantity("512Ki"), Some(512.0 * 1024.0));
            assert_eq!(parse_quantity("100Mi"), Some(100.0 * 1024.0 * 1024.0));
            assert_eq!(
                parse_quantity("1.5Gi"),
                Some(1.5 * 1024.0 * 1024.0 * 1024.0)
            );
        }

        #[test]
        fn test_percentage() {
            assert_eq!(parse_quantity("85%"), Some(85.0));
        }

        #[test]
        fn test_absent_values_excluded() {
            assert_eq!(parse_quantity("-"), None);
            assert_eq!(parse_quantity(""), None);
            assert_eq!(parse_quantity("   "), None);
        }

        #[test]
        fn test_garbage_is_none() {
            assert_eq!(parse_quantity("n/a"), None);
        }

        #[test]
        fn test_millicores_order_against_cores() {
            // 1.5 cores > 500m > 100m once units are applied
            let a = parse_quantity("1.5").unwrap();
            let b = parse_quantity("500m").unwrap();
            let c = parse_quantity("100m").unwrap();
            assert!(a > b && b > c);
        }
    }

    mod snapshot_tests {
        use super::*;

        #[test]
        fn test_cells_trimmed_on_capture() {
            let snap = TableSnapshot::new(vec![vec![" pod-a ".into(), " 250m".into()]]);
            assert_eq!(snap.rows()[0], vec!["pod-a", "250m"]);
        }

        #[test]
        fn test_column_extraction() {
            let snap = TableSnapshot::new(vec![
                vec!["pod-a".into(), "250m".into()],
                vec!["pod-b".into(), "500m".into()],
                vec!["pod-c".into()], // short row: column 1 missing
            ]);
            assert_eq!(snap.column(0), vec!["pod-a", "pod-b", "pod-c"]);
            assert_eq!(snap.column(1), vec!["250m", "500m"]);
        }

        #[test]
        fn test_empty_snapshot() {
            let snap = TableSnapshot::new(vec![]);
            assert!(snap.is_empty());
            assert_eq!(snap.row_count(), 0);
            assert!(snap.column(3).is_empty());
        }
    }

    mod descriptor_tests {
        use super::*;

        #[test]
        fn test_descriptor_construction() {
            let col = ColumnDescriptor::new("CPU Usage", 3, true, ColumnKind::Quantity);
            assert_eq!(col.name, "CPU Usage");
            assert_eq!(col.index, 3);
            assert!(col.sortable);
            assert_eq!(col.kind, ColumnKind::Quantity);
        }

        #[test]
        fn test_descriptor_serde_round_trip() {
            let col = ColumnDescriptor::new("Pod Name", 0, true, ColumnKind::Text);
            let json = serde_json::to_string(&col).unwrap();
            let back: ColumnDescriptor = serde_json::from_str(&json).unwrap();
            assert_eq!(col, back);
        }
    }
}
