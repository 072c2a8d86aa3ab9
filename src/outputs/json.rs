//! JSON output of a finished check.
//!
//! Reports are grouped by the day the check ran:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 203000_nasa-confirms-water-on-mars.json
//!     └── 211512_moon-landing-was-staged.json
//! ```

use crate::models::FactCheckReport;
use crate::utils::{ensure_writable_dir, slugify_title};
use chrono::{DateTime, Local};
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Where `report` is written under `json_output_dir`.
///
/// The date and time come from `report.checked_at`; an unparseable
/// timestamp falls back to the current local time.
pub fn report_path(json_output_dir: &str, report: &FactCheckReport) -> PathBuf {
    let checked_at = DateTime::parse_from_rfc3339(&report.checked_at)
        .map(|t| t.with_timezone(&Local))
        .unwrap_or_else(|_| Local::now());

    PathBuf::from(json_output_dir)
        .join(checked_at.format("%Y-%m-%d").to_string())
        .join(format!(
            "{}_{}.json",
            checked_at.format("%H%M%S"),
            slugify_title(&report.query)
        ))
}

/// Write a [`FactCheckReport`] as pretty-printed JSON.
///
/// # Returns
///
/// The path of the written file, or an error if directory creation or
/// file writing fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &FactCheckReport,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    let path = report_path(json_output_dir, report);

    if let Some(parent) = path.parent().and_then(|p| p.to_str()) {
        if let Err(e) = ensure_writable_dir(parent).await {
            error!(dir = %parent, error = %e, "JSON directory is not writable");
            return Err(e);
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON report");
    Ok(path)
}
