//! Port prober: connect, read one banner, record.
//!
//! A probe moves `Connecting -> Connected -> ReadingBanner -> Recorded`, or
//! ends in `Failed` straight from `Connecting`. There is no retry and no way
//! back to an earlier state.

use super::results::ResultSet;
use super::traits::{Connector, PortResult};
use super::{ScanObserver, ScanOptions};
use crate::banner::read_banner;
use crate::error::ConnectFailure;
use crate::types::Port;
use tracing::debug;

/// Terminal state of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Recorded(PortResult),
    Failed(ConnectFailure),
}

impl ProbeOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }
}

/// Probe a single port.
///
/// The only shared effect is the append to `results`; failures are reported
/// to the observer and logged, never propagated.
pub async fn probe<C: Connector>(
    connector: &C,
    target: &str,
    port: Port,
    options: &ScanOptions,
    results: &ResultSet,
    observer: &dyn ScanObserver,
) -> ProbeOutcome {
    let mut stream = match connector.connect(target, port, options.connect_timeout).await {
        Ok(stream) => stream,
        Err(failure) => {
            debug!(%port, reason = %failure, "port not open");
            observer.on_failure(port, &failure);
            return ProbeOutcome::Failed(failure);
        }
    };

    let banner = read_banner(&mut stream, options.read_timeout, options.banner_max_bytes).await;
    let result = PortResult::new(port, banner);

    results.record(result.clone());
    observer.on_open(&result);
    drop(stream);

    ProbeOutcome::Recorded(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::testing::{MockNetwork, RecordingObserver};
    use std::time::Duration;

    fn port(n: u16) -> Port {
        Port::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_open_port_is_recorded_with_banner() {
        let network = MockNetwork::new().with_open(22, b"SSH-2.0-OpenSSH\r\n");
        let results = ResultSet::new();
        let observer = RecordingObserver::default();

        let outcome = probe(
            &network,
            "10.0.0.1",
            port(22),
            &ScanOptions::default(),
            &results,
            &observer,
        )
        .await;

        let expected = PortResult::new(port(22), Some("SSH-2.0-OpenSSH".to_string()));
        assert_eq!(outcome, ProbeOutcome::Recorded(expected.clone()));
        assert_eq!(results.into_sorted(), vec![expected.clone()]);
        assert_eq!(*observer.opened.lock().unwrap(), vec![expected]);
    }

    #[tokio::test]
    async fn test_open_port_without_banner_is_still_open() {
        let network = MockNetwork::new().with_open(80, b"");
        let results = ResultSet::new();

        let outcome = probe(
            &network,
            "10.0.0.1",
            port(80),
            &ScanOptions::default(),
            &results,
            &RecordingObserver::default(),
        )
        .await;

        assert!(outcome.is_open());
        assert_eq!(results.into_sorted(), vec![PortResult::new(port(80), None)]);
    }

    #[tokio::test]
    async fn test_refused_port_leaves_no_trace() {
        let network = MockNetwork::new();
        let results = ResultSet::new();
        let observer = RecordingObserver::default();

        let outcome = probe(
            &network,
            "10.0.0.1",
            port(23),
            &ScanOptions::default(),
            &results,
            &observer,
        )
        .await;

        assert_eq!(outcome, ProbeOutcome::Failed(ConnectFailure::Refused));
        assert!(results.is_empty());
        assert!(observer.opened.lock().unwrap().is_empty());
        assert_eq!(
            *observer.failed.lock().unwrap(),
            vec![(port(23), ConnectFailure::Refused)]
        );
    }

    #[tokio::test]
    async fn test_hanging_port_times_out() {
        let network = MockNetwork::new().with_hanging(8080);
        let results = ResultSet::new();
        let options = ScanOptions::default().with_connect_timeout(Duration::from_millis(20));

        let outcome = probe(
            &network,
            "10.0.0.1",
            port(8080),
            &options,
            &results,
            &RecordingObserver::default(),
        )
        .await;

        assert_eq!(outcome, ProbeOutcome::Failed(ConnectFailure::Timeout));
        assert!(results.is_empty());
        assert_eq!(network.attempts(), 1);
    }
}
