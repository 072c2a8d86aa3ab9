//! LLM API interaction with a bounded wait.
//!
//! This module provides the interface for asking an OpenAI-compatible LLM
//! API to reason about a headline. The call is made exactly once; a slow or
//! failing service yields a [`ReasoningError`] that the verdict engine turns
//! into an `Unknown` verdict.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`AskAsync`]: Core trait defining async LLM interaction
//! - [`AskFnWrapper`]: Wraps the `awful_aj` library's `ask` function
//! - [`TimeoutAsk`]: Decorator that bounds any `AskAsync` implementation in time

use crate::error::ReasoningError;
use awful_aj::api::ask;
use awful_aj::{config::AwfulJadeConfig, template::ChatTemplate};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

/// Trait for async LLM interaction.
///
/// Implementors of this trait can send text to an LLM and receive a response.
/// This abstraction allows for different LLM backends or decorators (like a timeout).
pub trait AskAsync {
    /// Send the rendered prompt to the LLM and receive its raw text answer.
    async fn ask(&self, text: &str) -> Result<String, ReasoningError>;
}

/// Wrapper that gives up on an [`AskAsync`] call after a fixed duration.
pub struct TimeoutAsk<T> {
    inner: T,
    limit: Duration,
}

impl<T: AskAsync> TimeoutAsk<T> {
    pub fn new(inner: T, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

impl<T> fmt::Debug for TimeoutAsk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeoutAsk")
            .field("limit", &self.limit)
            .finish()
    }
}

impl<T: AskAsync> AskAsync for TimeoutAsk<T> {
    #[instrument(level = "info", skip_all)]
    async fn ask(&self, text: &str) -> Result<String, ReasoningError> {
        let t0 = Instant::now();
        match tokio::time::timeout(self.limit, self.inner.ask(text)).await {
            Ok(Ok(resp)) => {
                info!(
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    response_bytes = resp.len(),
                    "ask() succeeded"
                );
                Ok(resp)
            }
            Ok(Err(e)) => {
                error!(elapsed_ms = t0.elapsed().as_millis() as u64, error = %e, "ask() failed");
                Err(e)
            }
            Err(_) => {
                warn!(limit = ?self.limit, "ask() timed out");
                Err(ReasoningError::Timeout(self.limit))
            }
        }
    }
}

/// Wrapper around `awful_aj::api::ask` that implements [`AskAsync`].
///
/// This struct adapts the `awful_aj` library's `ask` function to work with
/// the [`AskAsync`] trait, enabling it to be used with [`TimeoutAsk`].
///
/// # Lifetime Parameters
///
/// * `'a` - The lifetime of the references to config and template
#[derive(Debug)]
pub struct AskFnWrapper<'a> {
    /// Reference to the LLM configuration (API keys, endpoints, model settings).
    pub config: &'a AwfulJadeConfig,
    /// Reference to the chat template defining the conversation structure.
    pub template: &'a ChatTemplate,
}

impl AskAsync for AskFnWrapper<'_> {
    #[instrument(level = "info", skip_all)]
    async fn ask(&self, text: &str) -> Result<String, ReasoningError> {
        let t0 = Instant::now();
        let res = ask(self.config, text.to_string(), self.template, None, None).await;
        let dt = t0.elapsed();

        res.map_err(|e| {
            warn!(elapsed_ms = dt.as_millis() as u64, error = %e, "API call failed");
            ReasoningError::Service(e.to_string())
        })
    }
}


#[cfg(test)]
mod tests {
    use super::tests_support::StubAsk;
    use super::*;

    #[tokio::test]
    async fn test_timeout_passes_through_answer() {
        let api = TimeoutAsk::new(StubAsk::answering("Verdict: Real"), Duration::from_secs(1));
        assert_eq!(api.ask("prompt").await.unwrap(), "Verdict: Real");
    }

    #[tokio::test]
    async fn test_timeout_passes_through_error() {
        let api = TimeoutAsk::new(StubAsk::failing("502 bad gateway"), Duration::from_secs(1));
        let err = api.ask("prompt").await.unwrap_err();
        assert!(matches!(err, ReasoningError::Service(ref m) if m == "502 bad gateway"));
    }

    #[tokio::test]
    async fn test_timeout_expires() {
        let mut slow = StubAsk::answering("Verdict: Real");
        slow.delay = Duration::from_millis(500);
        let api = TimeoutAsk::new(slow, Duration::from_millis(50));
        let err = api.ask("prompt").await.unwrap_err();
        assert!(matches!(err, ReasoningError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_single_attempt_only() {
        let api = TimeoutAsk::new(StubAsk::failing("down"), Duration::from_secs(1));
        let _ = api.ask("prompt").await;
        assert_eq!(api.inner.prompts.borrow().len(), 1);
    }

    #[test]
    fn test_debug_hides_inner() {
        let api = TimeoutAsk::new(StubAsk::answering(""), Duration::from_secs(3));
        assert_eq!(format!("{api:?}"), "TimeoutAsk { limit: 3s }");
    }
}
