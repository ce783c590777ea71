//! Live-browser scenarios against a running dashboard.
//!
//! Requires the `browser` feature, a chromium binary, and the dashboard
//! serving at `BASE_URL` (default `http://localhost:3000`):
//!
//! ```sh
//! cargo test --features browser --test e2e_dashboard -- --ignored
//! ```

use vigilar::facade::ensure_theme;
use vigilar::verify::{
    verify_persisted_matches_displayed, verify_sorted, verify_themes_differ,
    verify_toggled_back,
};
use vigilar::{DashboardConfig, Harness, PageFacade, Theme};

fn config() -> DashboardConfig {
    DashboardConfig::from_env().with_no_sandbox()
}

#[tokio::test]
#[ignore = "requires a running dashboard and chromium"]
async fn theme_toggle_flips_and_restores() {
    let mut harness = Harness::start(config()).await.unwrap();
    let initial = harness.page.current_theme().await.unwrap();

    harness.page.toggle_theme().await.unwrap();
    let flipped = harness.page.current_theme().await.unwrap();
    verify_themes_differ(initial, flipped).unwrap();

    harness.page.toggle_theme().await.unwrap();
    let restored = harness.page.current_theme().await.unwrap();
    verify_toggled_back(initial, restored).unwrap();

    harness.finish().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running dashboard and chromium"]
async fn theme_preference_survives_reload() {
    let mut harness = Harness::start(config()).await.unwrap();
    ensure_theme(&mut harness.page, Theme::Light).await.unwrap();

    harness.page.reload().await.unwrap();
    harness.page.wait_for_data().await.unwrap();

    let displayed = harness.page.current_theme().await.unwrap();
    assert_eq!(displayed, Theme::Light);
    let persisted = harness.page.stored_theme().await.unwrap();
    verify_persisted_matches_displayed(persisted, displayed).unwrap();

    harness.finish().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running dashboard and chromium"]
async fn theme_screenshots_capture_both_palettes() {
    let mut harness = Harness::start(config()).await.unwrap();

    ensure_theme(&mut harness.page, Theme::Dark).await.unwrap();
    let dark = harness
        .page
        .capture_screenshot("live_theme_dark")
        .await
        .unwrap();
    harness.page.toggle_theme().await.unwrap();
    let light = harness
        .page
        .capture_screenshot("live_theme_light")
        .await
        .unwrap();

    assert!(dark.is_file());
    assert!(light.is_file());

    harness.finish().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running dashboard and chromium"]
async fn sortable_columns_include_key_metrics() {
    let mut harness = Harness::start(config()).await.unwrap();
    let columns = harness.page.columns().await.unwrap();
    for name in ["Pod Name", "CPU Usage", "Memory Usage"] {
        let column = columns
            .iter()
            .find(|col| col.name.contains(name))
            .unwrap_or_else(|| panic!("missing column {name}"));
        assert!(column.sortable, "{name} should be sortable");
    }
    harness.finish().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running dashboard and chromium"]
async fn clicking_header_sorts_and_reverses() {
    let mut harness = Harness::start(config()).await.unwrap();

    harness.page.click_column_header("Pod Name").await.unwrap();
    let first = harness
        .page
        .sort_direction_of("Pod Name")
        .await
        .unwrap()
        .expect("Pod Name should be the active sort");
    let column = vigilar::find_column(&mut harness.page, "Pod Name")
        .await
        .unwrap();
    let values = harness.page.column_data(column.index).await.unwrap();
    verify_sorted(&values, column.kind, first).unwrap();

    harness.page.click_column_header("Pod Name").await.unwrap();
    let second = harness
        .page
        .sort_direction_of("Pod Name")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second, first.toggled());
    let values = harness.page.column_data(column.index).await.unwrap();
    verify_sorted(&values, column.kind, second).unwrap();

    harness.finish().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running dashboard and chromium"]
async fn quantity_columns_order_by_magnitude() {
    let mut harness = Harness::start(config()).await.unwrap();

    for name in ["CPU Usage", "Memory Usage"] {
        harness.page.click_column_header(name).await.unwrap();
        let direction = harness
            .page
            .sort_direction_of(name)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("{name} should be the active sort"));
        let column = vigilar::find_column(&mut harness.page, name).await.unwrap();
        let values = harness.page.column_data(column.index).await.unwrap();
        verify_sorted(&values, column.kind, direction).unwrap();
    }

    harness.finish().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running dashboard and chromium"]
async fn new_sort_column_clears_previous() {
    let mut harness = Harness::start(config()).await.unwrap();

    harness.page.click_column_header("Pod Name").await.unwrap();
    harness.page.click_column_header("CPU Usage").await.unwrap();

    assert_eq!(
        harness.page.sort_direction_of("Pod Name").await.unwrap(),
        None
    );
    assert!(harness
        .page
        .sort_direction_of("CPU Usage")
        .await
        .unwrap()
        .is_some());

    harness.finish().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running dashboard and chromium"]
async fn panels_are_optional() {
    let mut harness = Harness::start(config()).await.unwrap();
    // A dashboard without paper panels is valid; only assert on them
    // when they are rendered.
    if harness.page.has_panel().await.unwrap() {
        let snapshot = harness.page.table_snapshot().await.unwrap();
        assert!(!snapshot.is_empty());
    }
    harness.finish().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running dashboard and chromium"]
async fn refresh_reloads_data() {
    let mut harness = Harness::start(config()).await.unwrap();
    harness.page.refresh().await.unwrap();
    let snapshot = harness.page.table_snapshot().await.unwrap();
    assert!(!snapshot.is_empty());
    harness.finish().await.unwrap();
}
