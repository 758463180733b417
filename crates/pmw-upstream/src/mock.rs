//! Mock generator for testing.
//!
//! Provides [`MockGenerator`] for unit testing without network access.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::UpstreamError;
use crate::generation::Generator;

/// Scripted generator: responses are returned in queue order.
///
/// # Example
///
/// ```
/// use pmw_upstream::{Generator, MockGenerator};
///
/// let generator = MockGenerator::new().with_response("hello");
/// assert_eq!(generator.complete("hi").unwrap(), "hello");
/// assert_eq!(generator.calls(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockGenerator {
    responses: Mutex<VecDeque<Result<String, UpstreamError>>>,
    calls: AtomicUsize,
}

impl MockGenerator {
    /// Create an empty mock; calls fail until responses are queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue a failure.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_error(self, error: UpstreamError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Number of completion calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Generator for MockGenerator {
    fn complete(&self, _prompt: &str) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(UpstreamError::Other("mock exhausted".to_owned())))
    }
}
