//! Error types for each component boundary.
//!
//! None of these reach the user as a crash. The aggregator turns a
//! [`FetchFailure`] into an empty evidence set, and the verdict engine turns
//! [`ReasoningError`] and [`ClassifierError`] into an `Unknown` verdict.
//! [`ConfigError`] is the only one that can stop the binary, and only
//! before any network traffic happens.

use std::time::Duration;

/// A single fetch attempt did not produce a body.
#[derive(thiserror::Error, Debug)]
pub enum FetchFailure {
    #[error("refusing to fetch non-http(s) url: {0}")]
    InvalidUrl(String),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for FetchFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchFailure::Timeout
        } else if let Some(status) = e.status() {
            FetchFailure::Status(status.as_u16())
        } else {
            FetchFailure::Network(e.to_string())
        }
    }
}

/// The settings file could not be used.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse settings file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// The reasoning service did not produce usable text.
#[derive(thiserror::Error, Debug)]
pub enum ReasoningError {
    #[error("reasoning service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("reasoning service call failed: {0}")]
    Service(String),
}

/// The local classifier could not be loaded or run.
#[derive(thiserror::Error, Debug)]
pub enum ClassifierError {
    #[error("model artifact missing: {0}")]
    MissingArtifact(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("inference error: {0}")]
    Inference(String),

    #[error("expected 2 logits, got {0}")]
    LogitShape(usize),

    #[error("local classifier support was not compiled in")]
    NotCompiled,
}
