//! Error types for upstream calls.

/// Error from text-generation upstream operations.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error, timeout, decode failure).
    #[error("HTTP request failed")]
    Http(#[from] ureq::Error),

    /// HTTP response error (upstream returned error status).
    #[error("HTTP error: {status} - {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Returned payload was not the JSON the caller asked for.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Mock/test failure with a plain message.
    #[error("{0}")]
    Other(String),
}

impl UpstreamError {
    /// Whether a retry may succeed.
    ///
    /// Transport failures and 429/5xx statuses are transient. A parse
    /// failure is retryable too: re-prompting the model routinely
    /// produces parseable output where the previous attempt did not.
    /// Remaining 4xx statuses are permanent.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Json(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Other(_) => false,
        }
    }
}
