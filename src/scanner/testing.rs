//! In-memory network topology for exercising the scan engine without sockets.

use super::traits::{ConnectOutcome, Connector, PortResult};
use super::ScanObserver;
use crate::error::ConnectFailure;
use crate::types::Port;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;

/// A fake host: listed ports accept and send their banner bytes, everything
/// else refuses. Every attempt is counted.
#[derive(Default)]
pub struct MockNetwork {
    open: HashMap<u16, Vec<u8>>,
    hanging: HashSet<u16>,
    latency: Option<Duration>,
    barrier: Option<Arc<Barrier>>,
    attempts: AtomicUsize,
    attempted: Mutex<Vec<u16>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open(mut self, port: u16, banner: &[u8]) -> Self {
        self.open.insert(port, banner.to_vec());
        self
    }

    /// The port never answers; the connect only ends by timing out.
    pub fn with_hanging(mut self, port: u16) -> Self {
        self.hanging.insert(port);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Hold every connect until `parties` attempts are waiting, then release
    /// them all at once.
    pub fn with_barrier(mut self, parties: usize) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn attempted_ports(&self) -> Vec<u16> {
        let mut ports = self.attempted.lock().unwrap().clone();
        ports.sort_unstable();
        ports
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MockNetwork {
    type Stream = Cursor<Vec<u8>>;

    async fn connect(
        &self,
        _host: &str,
        port: Port,
        timeout: Duration,
    ) -> ConnectOutcome<Self::Stream> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.attempted.lock().unwrap().push(port.as_u16());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        let outcome = if self.hanging.contains(&port.as_u16()) {
            let never = std::future::pending::<()>();
            let _ = tokio::time::timeout(timeout, never).await;
            Err(ConnectFailure::Timeout)
        } else {
            match self.open.get(&port.as_u16()) {
                Some(banner) => Ok(Cursor::new(banner.clone())),
                None => Err(ConnectFailure::Refused),
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

/// Observer that remembers everything it was told.
#[derive(Default)]
pub struct RecordingObserver {
    pub opened: Mutex<Vec<PortResult>>,
    pub failed: Mutex<Vec<(Port, ConnectFailure)>>,
    pub done: AtomicUsize,
}

impl ScanObserver for RecordingObserver {
    fn on_open(&self, result: &PortResult) {
        self.opened.lock().unwrap().push(result.clone());
    }

    fn on_failure(&self, port: Port, failure: &ConnectFailure) {
        self.failed.lock().unwrap().push((port, failure.clone()));
    }

    fn on_probe_done(&self, _port: Port) {
        self.done.fetch_add(1, Ordering::SeqCst);
    }
}
