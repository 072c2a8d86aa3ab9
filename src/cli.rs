//! Command-line interface definitions for Fact or Fake.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Options can be provided via command-line flags or environment variables.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Fact or Fake application.
///
/// # Examples
///
/// ```sh
/// # Check a headline with the default sources
/// fact_or_fake "NASA confirms water on Mars"
///
/// # Also keep a JSON copy of the report
/// fact_or_fake -j ./reports "NASA confirms water on Mars"
///
/// # Custom settings and a local classifier directory
/// fact_or_fake -c settings.yaml --model-dir ./bert-fake-news "Aliens land in Paris"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// News headline to verify
    pub query: String,

    /// Optional path to a settings YAML file
    #[arg(short, long, env = "FACT_OR_FAKE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the awful_aj config.yaml (defaults to awful_aj's config dir)
    #[arg(long, env = "AJ_CONFIG")]
    pub aj_config: Option<PathBuf>,

    /// Output directory for the JSON report
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Directory holding model.onnx and tokenizer.json
    #[arg(long, env = "FACT_OR_FAKE_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Per-request fetch timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
