//! # banscan - Concurrent TCP Port Scanner with Banner Grabbing
//!
//! banscan connects to every port of an inclusive range at once, reads
//! whatever each open service sends first, and reports the open ports in
//! ascending order. Results can be saved as text and JSON, and a Shodan
//! lookup can enrich the report with what is publicly known about the host.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use banscan::scanner::{ScanEngine, ScanOptions, TcpConnector};
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = ScanEngine::new(TcpConnector::new(), ScanOptions::default());
//!     let outcome = engine.scan_range("192.168.1.1", "20-80").await.unwrap();
//!
//!     for result in &outcome.open_ports {
//!         println!("{} {}", result.port, result.banner_or("-"));
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated `Port` and `PortRange`
//! - [`scanner`] - The scan engine, the `Connector` seam and the TCP connector
//! - [`banner`] - Single bounded banner read
//! - [`intel`] - Host intelligence lookups (Shodan)
//! - [`output`] - Console rendering and report files
//! - [`config`] - Settings file and XDG paths
//! - [`cli`] - Command-line surface and scan pipeline
//! - [`error`] - Error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod intel;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{ConnectFailure, ScanError};
pub use scanner::{Connector, PortResult, ScanEngine, ScanOptions, ScanOutcome, ScanRequest};
pub use types::{Port, PortRange};
