//! Verification rules for theme and ordering checks.
//!
//! These are pure functions over captured page state. Scenarios capture
//! state through the page facade, then verify it here, so a failure
//! message describes data the test actually saw rather than a live DOM
//! that may have changed since.

use crate::result::{VigilarError, VigilarResult};
use crate::table::{parse_quantity, ColumnKind, SortDirection};
use crate::theme::Theme;
use std::cmp::Ordering;

/// Check that a column's values are ordered per `direction`.
///
/// Comparison follows the column kind: text compares case-insensitively,
/// quantities compare by unit-aware magnitude. Cells that carry no
/// comparable value (`-`, empty, unparseable quantities) are excluded
/// before the order check. Equal adjacent values are always in order.
pub fn verify_sorted(
    values: &[String],
    kind: ColumnKind,
    direction: SortDirection,
) -> VigilarResult<()> {
    match kind {
        ColumnKind::Text => {
            let keys: Vec<String> = values
                .iter()
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .collect();
            verify_ordered(&keys, direction, |a, b| a.cmp(b))
        }
        ColumnKind::Quantity => {
            let keys: Vec<f64> = values.iter().filter_map(|v| parse_quantity(v)).collect();
            verify_ordered(&keys, direction, |a, b| {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            })
        }
    }
}

fn verify_ordered<T: std::fmt::Debug>(
    keys: &[T],
    direction: SortDirection,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> VigilarResult<()> {
    for (i, pair) in keys.windows(2).enumerate() {
        let order = cmp(&pair[0], &pair[1]);
        let violated = match direction {
            SortDirection::Ascending => order == Ordering::Greater,
            SortDirection::Descending => order == Ordering::Less,
        };
        if violated {
            return Err(VigilarError::assertion(format!(
                "values not in {direction} order at position {i}: {:?} then {:?}",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}

/// Check that two observed themes differ (a toggle took effect)
pub fn verify_themes_differ(before: Theme, after: Theme) -> VigilarResult<()> {
    if before == after {
        return Err(VigilarError::assertion(format!(
            "theme did not change: still {before}"
        )));
    }
    Ok(())
}

/// Check that `observed` matches the theme an even number of toggles
/// from `initial` should land on (i.e. the original theme).
pub fn verify_toggled_back(initial: Theme, observed: Theme) -> VigilarResult<()> {
    if observed != initial {
        return Err(VigilarError::assertion(format!(
            "expected original theme {initial} after an even number of toggles, got {observed}"
        )));
    }
    Ok(())
}

/// Theme an initial theme lands on after `n` toggle activations
#[must_use]
pub const fn theme_after_toggles(initial: Theme, n: u32) -> Theme {
    if n % 2 == 0 {
        initial
    } else {
        initial.toggled()
    }
}

/// Check that the persisted theme preference matches the displayed theme
pub fn verify_persisted_matches_displayed(
    persisted: Option<Theme>,
    displayed: Theme,
) -> VigilarResult<()> {
    match persisted {
        Some(stored) if stored == displayed => Ok(()),
        Some(stored) => Err(VigilarError::assertion(format!(
            "persisted theme {stored} does not match displayed theme {displayed}"
        ))),
        None => Err(VigilarError::assertion(format!(
            "no persisted theme preference while displaying {displayed}"
        ))),
    }
}
