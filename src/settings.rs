//! Runtime settings loaded from an optional YAML file.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock behavior: Google News over the last 90 days, Snopes and Alt News as
//! fact-check sources, a 0.5 relevance threshold and a 5 second fetch bound.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// A fact-checking site searched with `{search_url}?s={terms}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FactCheckSource {
    pub name: String,
    pub search_url: String,
}

/// All tunables of the tool.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// User agent sent with every outbound request.
    pub user_agent: String,
    /// Upper bound for a single fetch.
    pub fetch_timeout_secs: u64,

    /// Google News RSS search endpoint.
    pub news_feed_url: String,
    /// Recency window appended as `when:<window>`; `None` searches all time.
    pub news_window: Option<String>,
    /// Maximum number of news items kept.
    pub news_limit: usize,
    /// Minimum similarity for a news title to count as evidence.
    pub relevance_threshold: f64,

    /// Heading tag scraped from fact-check result pages.
    pub heading_tag: String,
    /// Headings inspected per fact-check page.
    pub headings_per_source: usize,
    pub fact_check_sources: Vec<FactCheckSource>,
    /// Drop fact-check items whose link was already seen from an earlier source.
    pub dedupe_fact_checks: bool,

    /// Name of the awful_aj chat template used for the reasoning prompt.
    pub reasoning_template: String,
    pub reasoning_timeout_secs: u64,

    /// Directory holding `model.onnx` and `tokenizer.json`.
    pub model_dir: PathBuf,
    pub max_sequence_length: usize,
    /// Feed `token_type_ids` to the classifier (BERT exports need it, DistilBERT does not).
    pub use_token_type_ids: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            fetch_timeout_secs: 5,
            news_feed_url: "https://news.google.com/rss/search".to_string(),
            news_window: Some("90d".to_string()),
            news_limit: 5,
            relevance_threshold: 0.5,
            heading_tag: "h2".to_string(),
            headings_per_source: 3,
            fact_check_sources: vec![
                FactCheckSource {
                    name: "Snopes".to_string(),
                    search_url: "https://www.snopes.com/".to_string(),
                },
                FactCheckSource {
                    name: "Alt News".to_string(),
                    search_url: "https://www.altnews.in/".to_string(),
                },
            ],
            dedupe_fact_checks: false,
            reasoning_template: "fact_checker".to_string(),
            reasoning_timeout_secs: 120,
            model_dir: PathBuf::from("model"),
            max_sequence_length: 512,
            use_token_type_ids: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let parsed = Self::from_yaml(&raw)?;
                info!(path = %path.display(), "Loaded settings file");
                parsed
            }
            None => Self::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from YAML text. Missing fields take their defaults.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.relevance_threshold) {
            return Err(ConfigError::Invalid {
                field: "relevance_threshold",
                reason: format!("{} is outside [0, 1]", self.relevance_threshold),
            });
        }
        if self.news_limit == 0 {
            return Err(invalid_zero("news_limit"));
        }
        if self.headings_per_source == 0 {
            return Err(invalid_zero("headings_per_source"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(invalid_zero("fetch_timeout_secs"));
        }
        if self.reasoning_timeout_secs == 0 {
            return Err(invalid_zero("reasoning_timeout_secs"));
        }
        check_http_url("news_feed_url", &self.news_feed_url)?;
        for source in &self.fact_check_sources {
            check_http_url("fact_check_sources", &source.search_url)?;
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn reasoning_timeout(&self) -> Duration {
        Duration::from_secs(self.reasoning_timeout_secs)
    }
}

fn invalid_zero(field: &'static str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: "must be greater than zero".to_string(),
    }
}

fn check_http_url(field: &'static str, raw: &str) -> Result<(), ConfigError> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        Ok(url) => Err(ConfigError::Invalid {
            field,
            reason: format!("unsupported scheme `{}` in {raw}", url.scheme()),
        }),
        Err(e) => Err(ConfigError::Invalid {
            field,
            reason: format!("{raw}: {e}"),
        }),
    }
}
