//! Error types for banscan.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

pub use crate::types::PortError;

/// Scan-level error. Only an invalid request can fail a scan; per-port
/// failures are absorbed by the prober.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error(transparent)]
    InvalidRange(#[from] PortError),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Why a single connection attempt did not produce an open socket.
///
/// All variants mean "not open" to the scanner; the distinction only
/// feeds logging and observers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectFailure {
    #[error("connection timed out")]
    Timeout,

    #[error("connection refused")]
    Refused,

    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for ConnectFailure {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::ConnectionRefused => Self::Refused,
            std::io::ErrorKind::TimedOut => Self::Timeout,
            _ => Self::Other(e.to_string()),
        }
    }
}

/// Errors from the host-intelligence collaborator.
#[derive(Error, Debug)]
pub enum IntelError {
    #[error("invalid API key: {0}")]
    InvalidCredential(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not resolve '{0}' to an IP address")]
    Resolve(String),
}

pub type IntelResult<T> = Result<T, IntelError>;

/// Errors writing persisted scan reports.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Errors loading application settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
