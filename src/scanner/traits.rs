//! Connector trait abstraction.
//!
//! The orchestrator only ever talks to the network through a `Connector`,
//! which lets tests substitute an in-memory topology for real sockets.

use crate::error::ConnectFailure;
use crate::types::Port;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::AsyncRead;

/// Placeholder used when rendering a port that sent no banner.
pub const NO_BANNER: &str = "N/A";

/// One confirmed-open port.
///
/// A `PortResult` exists only if a TCP connection to `port` succeeded.
/// A missing banner does not make the port any less open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortResult {
    /// The port number that was probed.
    pub port: Port,
    /// Banner captured from the service (if any).
    pub banner: Option<String>,
}

impl PortResult {
    pub fn new(port: Port, banner: Option<String>) -> Self {
        Self { port, banner }
    }

    /// The banner text, or `placeholder` when none was read.
    pub fn banner_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.banner.as_deref().unwrap_or(placeholder)
    }
}

/// Outcome of a single connection attempt: an owned stream, or the
/// classified reason the port is considered closed.
pub type ConnectOutcome<S> = Result<S, ConnectFailure>;

/// Opens one TCP connection to a single `(host, port)`.
///
/// Implementations make exactly one attempt, bounded by `timeout`, and never
/// retry. A returned stream is owned by the caller and is released when
/// dropped; on failure no resource may outlive the call.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// The connected byte stream handed to the banner reader.
    type Stream: AsyncRead + Unpin + Send + 'static;

    async fn connect(&self, host: &str, port: Port, timeout: Duration)
        -> ConnectOutcome<Self::Stream>;
}
