//! Agentic browser smoke check: drive a real site end to end.
//!
//! Launches chromium, loads the Hacker News "Show" listing, and prints
//! the top post title. Useful as a quick standalone proof that browser
//! launch, navigation, and evaluation all work before pointing the
//! suite at the dashboard.
//!
//! ```sh
//! cargo run --features browser --example hn_smoke
//! ```

use vigilar::browser::Browser;
use vigilar::fixture::init_tracing;
use vigilar::{DashboardConfig, VigilarError, VigilarResult};

#[tokio::main]
async fn main() -> VigilarResult<()> {
    init_tracing();

    let config = DashboardConfig::new().with_no_sandbox();
    let browser = Browser::launch(&config).await?;
    let mut page = browser.new_page().await?;

    page.goto("https://news.ycombinator.com/show").await?;

    let title: Option<String> = page
        .eval("(() => { const el = document.querySelector('.athing .titleline a'); return el ? el.textContent.trim() : null; })()")
        .await?;
    let title = title.ok_or_else(|| VigilarError::not_found("top Show HN post title"))?;

    println!("Top Show HN post: {title}");

    browser.close().await
}
