//! Vigilar: end-to-end verification of the pod metrics dashboard.
//!
//! Vigilar (Spanish: "to watch over") drives the dashboard's two
//! user-visible behaviours, the light/dark theme toggle and the
//! sortable metrics table, and verifies their contracts: the theme
//! flips and persists across reloads, at most one column is ever the
//! active sort, and sorted quantity columns order by unit-aware
//! magnitude rather than string value.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     VIGILAR Architecture                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌─────────────┐   ┌──────────────────────┐  │
//! │  │ Scenario  │   │ PageFacade  │   │ ScriptedDashboard    │  │
//! │  │ (Rust     │──►│ (trait)     │◄──│ (in-memory model)    │  │
//! │  │  test)    │   │             │   ├──────────────────────┤  │
//! │  └───────────┘   └─────────────┘   │ CdpDashboardPage     │  │
//! │                                    │ (chromium, feature   │  │
//! │                                    │  "browser")          │  │
//! │                                    └──────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The default test suite runs against [`mock::ScriptedDashboard`]
//! with no browser. Enable the `browser` feature to drive a real
//! chromium instance against a running dashboard.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod catalog;
pub mod config;
pub mod facade;
pub mod fixture;
pub mod mock;
pub mod result;
pub mod table;
pub mod theme;
pub mod verify;
pub mod wait;

#[cfg(feature = "browser")]
pub mod browser;
#[cfg(feature = "browser")]
pub mod page;

pub use config::DashboardConfig;
pub use facade::{ensure_theme, find_column, PageFacade};
pub use mock::ScriptedDashboard;
pub use result::{VigilarError, VigilarResult};
pub use table::{ColumnDescriptor, ColumnKind, SortDirection, TableSnapshot};
pub use theme::Theme;
pub use wait::WaitOptions;

#[cfg(feature = "browser")]
pub use fixture::Harness;
#[cfg(feature = "browser")]
pub use page::CdpDashboardPage;
