//! Bounded polling waits.
//!
//! Every wait in a scenario is bounded: a condition is re-checked at a
//! fixed interval until it holds or the deadline passes, and an expired
//! wait reports which of two failure modes occurred: the element never
//! appeared, or it appeared but the condition never held on it.

use crate::result::VigilarError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options for a bounded wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Maximum time to wait in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            poll_interval_ms: 50,
        }
    }
}

impl WaitOptions {
    /// Create wait options
    #[must_use]
    pub const fn new(timeout_ms: u64, poll_interval_ms: u64) -> Self {
        Self {
            timeout_ms,
            poll_interval_ms,
        }
    }

    /// Timeout as a Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as a Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// How an expired wait failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutKind {
    /// The target element never appeared in the DOM
    ElementMissing,
    /// The element was present but the condition never held
    ConditionNotMet,
}

impl TimeoutKind {
    /// Build the timeout error for a named wait
    #[must_use]
    pub fn into_error(self, what: &str, timeout_ms: u64) -> VigilarError {
        let waited_for = match self {
            Self::ElementMissing => format!("{what} (element never appeared)"),
            Self::ConditionNotMet => {
                format!("{what} (element present but condition never held)")
            }
        };
        VigilarError::Timeout {
            waited_for,
            ms: timeout_ms,
        }
    }
}

/// Poll an async condition until it holds or the deadline passes.
///
/// The condition returns `Ok(true)` when satisfied, `Ok(false)` to keep
/// polling, or an error to abort the wait immediately. On expiry the
/// `kind` closure is consulted once more to classify the failure.
#[cfg(feature = "browser")]
pub async fn poll_until<C, F, K, G>(
    what: &str,
    options: WaitOptions,
    mut condition: C,
    mut kind: K,
) -> crate::result::VigilarResult<()>
where
    C: FnMut() -> F,
    F: std::future::Future<Output = crate::result::VigilarResult<bool>>,
    K: FnMut() -> G,
    G: std::future::Future<Output = TimeoutKind>,
{
    let deadline = std::time::Instant::now() + options.timeout();
    loop {
        if condition().await? {
            return Ok(());
        }
        if std::time::Instant::now() >= deadline {
            return Err(kind().await.into_error(what, options.timeout_ms));
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}
