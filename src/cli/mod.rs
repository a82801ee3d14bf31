//! Command-line interface definitions.
//!
//! Uses `clap` derive macros for declarative argument parsing. The scan
//! pipeline driven by these arguments lives in [`scan`].

mod scan;

pub use scan::{enrich, Enrichment};

use crate::config::AppSettings;
use crate::error::ConfigResult;
use clap::Parser;
use std::path::PathBuf;

/// banscan - a concurrent TCP port scanner with banner grabbing.
///
/// Probes every port of the range at once, prints open ports as they are
/// found, writes a text report (and optionally JSON) and, when a Shodan API
/// key is available, prints what Shodan knows about the host.
#[derive(Parser, Debug)]
#[command(name = "banscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Port scanner with banner grabbing and Shodan intelligence", long_about = None)]
pub struct Cli {
    /// Target IP address or domain
    #[arg(short, long, value_name = "HOST")]
    pub target: String,

    /// Port range to scan (e.g., 20-80)
    #[arg(short, long, value_name = "START-END")]
    pub ports: String,

    /// Also save results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Connection timeout in milliseconds [default: 1000]
    #[arg(long, value_name = "MS")]
    pub connect_timeout: Option<u64>,

    /// Banner read timeout in milliseconds [default: 1000]
    #[arg(long, value_name = "MS")]
    pub read_timeout: Option<u64>,

    /// Maximum concurrent connection attempts, 0 for unbounded [default: 0]
    #[arg(short = 'c', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Directory for report files [default: results]
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to a settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Shodan API key (also read from a .env file)
    #[arg(long, env = "SHODAN_API_KEY", hide_env_values = true)]
    pub shodan_key: Option<String>,

    /// Skip the Shodan lookup
    #[arg(long)]
    pub no_intel: bool,

    /// Show a progress bar while scanning
    #[arg(long)]
    pub progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Settings from file, with command-line flags applied on top.
    pub fn settings(&self) -> ConfigResult<AppSettings> {
        let base = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut settings: AppSettings) -> AppSettings {
        if let Some(ms) = self.connect_timeout {
            settings.connect_timeout_ms = ms;
        }
        if let Some(ms) = self.read_timeout {
            settings.read_timeout_ms = ms;
        }
        if let Some(limit) = self.concurrency {
            settings.concurrency = limit;
        }
        if let Some(dir) = &self.output_dir {
            settings.results_dir = dir.clone();
        }
        settings
    }

    /// The Shodan key, if one was supplied and is not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.shodan_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
