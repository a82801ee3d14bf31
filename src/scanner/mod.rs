//! Scanner module - the concurrent scan engine.
//!
//! A scan launches one probe per port of the requested range, all up front,
//! then waits for every one of them before handing back the sorted result
//! set. Probes share nothing but the scan's own [`ResultSet`].

pub mod probe;
pub mod results;
pub mod tcp;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

use crate::banner::{BANNER_TIMEOUT, MAX_BANNER_SIZE};
use crate::error::{ConnectFailure, ScanResult};
use crate::types::{Port, PortRange};
use chrono::{DateTime, Local};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

pub use probe::{probe, ProbeOutcome};
pub use results::ResultSet;
pub use tcp::TcpConnector;
pub use traits::{ConnectOutcome, Connector, PortResult, NO_BANNER};

/// Default timeout for a single connection attempt.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// A validated scan request: one target, one inclusive port range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    target: String,
    range: PortRange,
}

impl ScanRequest {
    pub fn new(target: impl Into<String>, range: PortRange) -> Self {
        Self {
            target: target.into(),
            range,
        }
    }

    /// Build a request from a raw `START-END` range string.
    pub fn parse(target: impl Into<String>, ports: &str) -> ScanResult<Self> {
        let range: PortRange = ports.parse()?;
        Ok(Self::new(target, range))
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn range(&self) -> PortRange {
        self.range
    }
}

/// How many probes may be connecting at the same time.
///
/// Either way every probe is spawned before the first one finishes; a bound
/// only makes the surplus wait for a permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyPolicy {
    #[default]
    Unbounded,
    Bounded(NonZeroUsize),
}

impl ConcurrencyPolicy {
    /// `0` means unbounded.
    pub fn from_limit(limit: usize) -> Self {
        NonZeroUsize::new(limit).map_or(Self::Unbounded, Self::Bounded)
    }

    fn semaphore(self) -> Option<Arc<Semaphore>> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(limit) => Some(Arc::new(Semaphore::new(limit.get()))),
        }
    }
}

impl std::fmt::Display for ConcurrencyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbounded => write!(f, "unbounded"),
            Self::Bounded(limit) => write!(f, "{}", limit),
        }
    }
}

/// Per-probe limits and the execution policy for a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Timeout of the single banner read.
    pub read_timeout: Duration,
    /// Banner read buffer size.
    pub banner_max_bytes: usize,
    pub policy: ConcurrencyPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: BANNER_TIMEOUT,
            banner_max_bytes: MAX_BANNER_SIZE,
            policy: ConcurrencyPolicy::Unbounded,
        }
    }
}

impl ScanOptions {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_banner_max_bytes(mut self, max_bytes: usize) -> Self {
        self.banner_max_bytes = max_bytes;
        self
    }

    pub fn with_policy(mut self, policy: ConcurrencyPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Receives probe events as they happen.
///
/// Called concurrently from many probes and in no particular order.
pub trait ScanObserver: Send + Sync {
    fn on_open(&self, _result: &PortResult) {}

    fn on_failure(&self, _port: Port, _failure: &ConnectFailure) {}

    /// Called once per probe after it reached a terminal state.
    fn on_probe_done(&self, _port: Port) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl ScanObserver for SilentObserver {}

/// The frozen result of one scan run.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub target: String,
    pub range: PortRange,
    pub probes_launched: usize,
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
    /// Open ports, strictly ascending.
    pub open_ports: Vec<PortResult>,
}

impl ScanOutcome {
    pub fn open_count(&self) -> usize {
        self.open_ports.len()
    }

    pub fn is_open(&self, port: u16) -> bool {
        self.open_ports
            .binary_search_by_key(&port, |r| r.port.as_u16())
            .is_ok()
    }
}

/// Drives a scan over any [`Connector`].
pub struct ScanEngine<C: Connector> {
    connector: Arc<C>,
    options: Arc<ScanOptions>,
    observer: Arc<dyn ScanObserver>,
}

impl<C: Connector> ScanEngine<C> {
    pub fn new(connector: C, options: ScanOptions) -> Self {
        Self {
            connector: Arc::new(connector),
            options: Arc::new(options),
            observer: Arc::new(SilentObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Validate `ports` and scan it. An invalid range returns before any
    /// probe is launched.
    pub async fn scan_range(&self, target: &str, ports: &str) -> ScanResult<ScanOutcome> {
        let request = ScanRequest::parse(target, ports)?;
        Ok(self.scan(&request).await)
    }

    /// Probe every port of the request and wait for all of them.
    pub async fn scan(&self, request: &ScanRequest) -> ScanOutcome {
        let started_at = Local::now();
        let clock = Instant::now();
        let range = request.range();
        let target: Arc<str> = Arc::from(request.target());
        let results = ResultSet::new();
        let limiter = self.options.policy.semaphore();

        info!(
            target = %target,
            %range,
            policy = %self.options.policy,
            "starting scan"
        );

        let mut probes = JoinSet::new();
        for port in range.iter() {
            let connector = Arc::clone(&self.connector);
            let options = Arc::clone(&self.options);
            let observer = Arc::clone(&self.observer);
            let target = Arc::clone(&target);
            let results = results.clone();
            let limiter = limiter.clone();

            probes.spawn(async move {
                // Only fails if the semaphore is closed, which never happens.
                let _permit = match limiter {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };

                probe(&*connector, &target, port, &options, &results, &*observer).await;
                observer.on_probe_done(port);
            });
        }
        let probes_launched = probes.len();

        while let Some(joined) = probes.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "probe task did not complete");
            }
        }

        let open_ports = results.into_sorted();
        let elapsed = clock.elapsed();

        info!(
            target = %target,
            probes = probes_launched,
            open = open_ports.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "scan complete"
        );

        ScanOutcome {
            target: target.to_string(),
            range,
            probes_launched,
            started_at,
            elapsed,
            open_ports,
        }
    }
}
