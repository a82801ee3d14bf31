//! TCP connect implementation of [`Connector`].
//!
//! Performs a standard TCP connect using the operating system's socket API.
//! Name resolution happens inside the connect attempt and counts against the
//! same timeout.

use super::traits::{ConnectOutcome, Connector};
use crate::error::ConnectFailure;
use crate::types::Port;
use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Connector backed by real TCP sockets.
///
/// Does not require elevated privileges. Completes the full handshake, so
/// every probe is visible to the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl TcpConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, host: &str, port: Port, limit: Duration) -> ConnectOutcome<TcpStream> {
        match timeout(limit, TcpStream::connect((host, port.as_u16()))).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(ConnectFailure::from(e)),
            Err(_) => Err(ConnectFailure::Timeout),
        }
    }
}
