//! Persisted scan reports.
//!
//! Writes a timestamped text log and, on request, a JSON document next to it.
//! Both list open ports in ascending order.

use crate::error::ReportResult;
use crate::scanner::{ScanOutcome, NO_BANNER};
use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name timestamp, minute resolution.
const FILE_STAMP: &str = "%Y%m%d_%H%M";

/// JSON shape of a saved scan.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub target: &'a str,
    /// ISO-8601 wall-clock time of the run.
    pub timestamp: String,
    pub open_ports: Vec<JsonPort<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonPort<'a> {
    pub port: u16,
    pub banner: &'a str,
}

impl<'a> JsonReport<'a> {
    pub fn new(outcome: &'a ScanOutcome, at: DateTime<Local>) -> Self {
        Self {
            target: &outcome.target,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, false),
            open_ports: outcome
                .open_ports
                .iter()
                .map(|r| JsonPort {
                    port: r.port.as_u16(),
                    banner: r.banner_or(NO_BANNER),
                })
                .collect(),
        }
    }
}

/// Render the text report body.
pub fn render_text(outcome: &ScanOutcome, at: DateTime<Local>) -> String {
    let mut text = format!(
        "Scan results for {} on {}\n",
        outcome.target,
        at.format("%Y-%m-%d %H:%M:%S%.6f")
    );
    text.push_str(&"-".repeat(50));
    text.push('\n');

    for result in &outcome.open_ports {
        text.push_str(&format!(
            "Port {} open | Banner: {}\n",
            result.port,
            result.banner_or(NO_BANNER)
        ));
    }
    text
}

/// Write `scan_log_<stamp>.txt` under `dir`, creating it if needed.
pub fn save_text(dir: &Path, outcome: &ScanOutcome, at: DateTime<Local>) -> ReportResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("scan_log_{}.txt", at.format(FILE_STAMP)));

    fs::write(&path, render_text(outcome, at))?;
    debug!(path = %path.display(), "text report written");
    Ok(path)
}

/// Write `scan_results_<stamp>.json` under `dir`, creating it if needed.
pub fn save_json(dir: &Path, outcome: &ScanOutcome, at: DateTime<Local>) -> ReportResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("scan_results_{}.json", at.format(FILE_STAMP)));

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    JsonReport::new(outcome, at).serialize(&mut serializer)?;

    fs::write(&path, buffer)?;
    debug!(path = %path.display(), "JSON report written");
    Ok(path)
}
