//! Result and error types for Vigilar.

use thiserror::Error;

/// Result type for Vigilar operations
pub type VigilarResult<T> = Result<T, VigilarError>;

/// Errors that can occur while driving or verifying the dashboard
#[derive(Debug, Error)]
pub enum VigilarError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// JavaScript evaluation error
    #[error("Evaluation failed: {message}")]
    EvalError {
        /// Error message
        message: String,
    },

    /// A bounded wait expired. `waited_for` states whether the element
    /// never appeared or appeared without the condition being met.
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Description of the wait, including the failure mode
        waited_for: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// A named lookup (e.g. column header by label) matched nothing
    #[error("Not found: {what}")]
    NotFound {
        /// What was looked up
        what: String,
    },

    /// A verification rule evaluated false
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    ScreenshotError {
        /// Error message
        message: String,
    },

    /// Browser storage access error
    #[error("Storage access failed: {message}")]
    StorageError {
        /// Error message
        message: String,
    },

    /// Fixture error (setup/teardown failed)
    #[error("Fixture error: {message}")]
    FixtureError {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VigilarError {
    /// Build an assertion failure from a formatted message
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Build a not-found error for a named lookup
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}
