use thiserror::Error;

/// Errors that abort a crawl
///
/// Per-item and per-range parse rejections never surface here; they are
/// recovered locally by the extractor. Only structural and resource failures
/// propagate to the caller.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The browser process could not be started
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// An existing browser could not be reached
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// A selector the crawl depends on matched nothing
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timed out after {timeout_ms}ms waiting for {what}")]
    Timeout { what: String, timeout_ms: u64 },

    #[error("Script evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Failed to parse page snapshot: {0}")]
    SnapshotParseFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Snapshot storage failed: {0}")]
    Storage(String),
}

impl CrawlError {
    /// Whether the error means the venue page no longer looks the way the selectors expect
    pub fn is_structural(&self) -> bool {
        matches!(self, CrawlError::ElementNotFound(_) | CrawlError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
