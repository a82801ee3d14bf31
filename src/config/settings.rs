//! Application settings and paths.
//!
//! Settings are read from a JSON file in the XDG config directory (or an
//! explicit path) and overridden by command-line flags.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{ConcurrencyPolicy, ScanOptions};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/banscan)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the per-user directories. Nothing is created.
    pub fn discover() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("com", "banscan", "banscan").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Connection timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Banner read timeout in milliseconds.
    pub read_timeout_ms: u64,
    /// Banner read buffer size in bytes.
    pub banner_max_bytes: usize,
    /// Maximum probes connecting at once, 0 for unbounded.
    pub concurrency: usize,
    /// Directory that receives report files.
    pub results_dir: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 1000,
            read_timeout_ms: 1000,
            banner_max_bytes: 1024,
            concurrency: 0,
            results_dir: PathBuf::from("results"),
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when no settings file exists.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Per-probe limits and execution policy derived from these settings.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::default()
            .with_connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .with_read_timeout(Duration::from_millis(self.read_timeout_ms))
            .with_banner_max_bytes(self.banner_max_bytes)
            .with_policy(ConcurrencyPolicy::from_limit(self.concurrency))
    }
}
