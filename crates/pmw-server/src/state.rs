//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use pmw_retry::RetryPolicy;
use pmw_store::Store;
use pmw_upstream::Generator;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Entity and audit store.
    pub(crate) store: Arc<dyn Store>,
    /// Text-generation upstream (if configured).
    pub(crate) generator: Option<Arc<dyn Generator>>,
    /// Retry policy applied to upstream calls.
    pub(crate) retry: RetryPolicy,
    /// Application version reported by the health endpoint.
    pub(crate) version: String,
}

impl AppState {
    /// Check if a generation upstream is configured.
    #[must_use]
    pub(crate) fn upstream_enabled(&self) -> bool {
        self.generator.is_some()
    }
}
