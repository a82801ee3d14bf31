//! Banner grabbing for connected TCP sockets.
//!
//! Reads whatever the service sends first. No probes are written and the
//! read is never retried: one bounded read, one buffer.

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;
use tracing::debug;

/// Default maximum bytes to read for a banner.
pub const MAX_BANNER_SIZE: usize = 1024;

/// Default timeout for the banner read.
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(1);

/// Perform a single bounded read on an already-connected stream.
///
/// Returns `None` when the read times out, the peer closes without sending
/// anything, the read fails, or the received bytes are only whitespace.
/// A `None` here never means the port is closed.
pub async fn read_banner<S>(
    stream: &mut S,
    read_timeout: Duration,
    max_bytes: usize,
) -> Option<String>
where
    S: AsyncRead + Unpin + ?Sized,
{
    let mut buffer = vec![0u8; max_bytes.max(1)];

    match timeout(read_timeout, stream.read(&mut buffer)).await {
        Ok(Ok(0)) => None,
        Ok(Ok(n)) => sanitize_banner(&buffer[..n]),
        Ok(Err(e)) => {
            debug!(error = %e, "banner read failed");
            None
        }
        Err(_) => None,
    }
}

/// Decode a raw banner and strip surrounding whitespace and control bytes.
///
/// Invalid UTF-8 is replaced rather than rejected.
fn sanitize_banner(data: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(data);
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c.is_control());

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
