//! Scan-scoped result collection.
//!
//! Every scan run owns its own `ResultSet`; probes append through cheap
//! clones of the handle and the orchestrator freezes it after the barrier.

use super::traits::PortResult;
use std::sync::{Arc, Mutex, PoisonError};

/// Concurrently populated collection of open ports for one scan run.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    inner: Arc<Mutex<Vec<PortResult>>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one result. Appends from concurrent probes are serialized.
    pub fn record(&self, result: PortResult) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result);
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the collection and return it sorted by ascending port.
    ///
    /// Must only be called once every probe has finished.
    pub fn into_sorted(self) -> Vec<PortResult> {
        let mut results = match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        };

        results.sort_unstable_by_key(|r| r.port);
        debug_assert!(
            results.windows(2).all(|w| w[0].port < w[1].port),
            "duplicate port in result set"
        );
        results
    }
}
