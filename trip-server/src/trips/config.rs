//! Reconciliation configuration.

use std::time::Duration;

/// Configuration parameters for reconciliation.
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Maximum number of trips refreshed at the same time.
    pub concurrency: usize,

    /// Upper bound on refreshing the whole set (seconds).
    /// Provider calls have their own, shorter timeouts.
    pub timeout_secs: u64,
}

impl ReconcileConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(concurrency: usize, timeout_secs: u64) -> Self {
        Self {
            concurrency,
            timeout_secs,
        }
    }

    /// Returns the overall timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout_secs: 60,
        }
    }
}
