//! # Fact or Fake
//!
//! Checks a news headline against the web and asks an AI model whether it is
//! likely real or fake.
//!
//! ## Features
//!
//! - Searches Google News RSS for related coverage (last 90 days by default)
//!   and keeps only items whose titles closely match the headline
//! - Searches fact-checking sites (Snopes and Alt News by default)
//! - Sends the evidence to an OpenAI-compatible LLM API for a Real/Fake verdict
//! - Falls back to a local ONNX classifier when no evidence is found at all
//! - Prints the result as text cards and optionally writes a JSON report
//!
//! ## Usage
//!
//! ```sh
//! fact_or_fake "NASA confirms water on Mars" -j ./reports
//! ```
//!
//! ## Architecture
//!
//! Each run handles one headline:
//! 1. **Aggregation**: Fetch the news feed and fact-check pages concurrently
//! 2. **Verdict**: Reason over the evidence, or classify the headline locally
//! 3. **Output**: Print the report, optionally write it as JSON

use awful_aj::{config, config::AwfulJadeConfig, config_dir, template, template::ChatTemplate};
use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod api;
mod cli;
mod error;
mod fetch;
mod models;
mod outputs;
mod relevance;
mod scrapers;
mod settings;
mod utils;
mod verdict;

use aggregate::Aggregator;
use api::{AskFnWrapper, TimeoutAsk};
use cli::Cli;
use fetch::HttpFetcher;
use models::FactCheckReport;
use outputs::{json, terminal};
use settings::Settings;
use utils::ensure_writable_dir;
use verdict::{Capability, VerdictEngine, classifier};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("fact_or_fake starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, ?args.json_output_dir, ?args.model_dir, "Parsed CLI arguments");

    let query = args.query.trim().to_string();
    if query.is_empty() {
        warn!("Empty headline given");
        return Err("Please enter a headline first.".into());
    }

    // ---- Settings ----
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(dir) = &args.model_dir {
        settings.model_dir = dir.clone();
    }
    if let Some(secs) = args.timeout_secs {
        settings.fetch_timeout_secs = secs;
    }
    settings.validate()?;

    // Early check: ensure JSON output dir is writable
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Collaborators ----
    let backend = load_reasoning_backend(&args, &settings).await;
    if let Err(why) = &backend {
        warn!(%why, "Reasoning service unavailable; evidence-based verdicts disabled");
    }
    let reasoner = Capability::from_result(backend.as_ref().map(|(config, template)| {
        TimeoutAsk::new(AskFnWrapper { config, template }, settings.reasoning_timeout())
    }));
    let local = classifier::load(&settings);
    debug!(
        reasoner_ready = reasoner.is_ready(),
        classifier_ready = local.is_ready(),
        "Verdict strategies initialized"
    );
    let engine = VerdictEngine::new(reasoner, local);

    let fetcher = HttpFetcher::new(&settings.user_agent, settings.fetch_timeout())?;
    let aggregator = Aggregator::new(fetcher, &settings);

    // ---- Aggregate, then decide ----
    let evidence = aggregator.aggregate(&query).await;
    let verdict = engine
        .classify(&query, &evidence.news, &evidence.fact_checks)
        .await;

    let report = FactCheckReport {
        query: query.clone(),
        checked_at: Local::now().to_rfc3339(),
        news: evidence.news,
        fact_checks: evidence.fact_checks,
        verdict,
    };

    print!("{}", terminal::render_report(&report));

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_report(&report, dir).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        label = %report.verdict.label,
        "Execution complete"
    );

    Ok(())
}

/// Load the awful_aj config and chat template used by the reasoning service.
///
/// Failures are reported as a reason string; the engine then answers
/// `Unknown` instead of calling the service.
#[instrument(level = "info", skip_all)]
async fn load_reasoning_backend(
    args: &Cli,
    settings: &Settings,
) -> Result<(AwfulJadeConfig, ChatTemplate), String> {
    let conf_file = match &args.aj_config {
        Some(path) => path.clone(),
        None => config_dir()
            .map_err(|e| format!("cannot locate awful_aj config dir: {e}"))?
            .join("config.yaml"),
    };
    let config_path = conf_file
        .to_str()
        .ok_or_else(|| format!("not a valid config filename: {}", conf_file.display()))?;
    let config = config::load_config(config_path)
        .map_err(|e| format!("cannot load {config_path}: {e}"))?;
    info!(config_path, "Loaded configuration");

    let template = template::load_template(&settings.reasoning_template)
        .await
        .map_err(|e| format!("cannot load template `{}`: {e}", settings.reasoning_template))?;
    info!(template = %settings.reasoning_template, "Loaded template");

    Ok((config, template))
}
