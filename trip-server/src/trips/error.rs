//! Reconciliation error types.

use std::time::Duration;

/// Unexpected failures while reconciling saved trips.
///
/// Provider failures are not represented here: they degrade to absent
/// fields inside the refresh pipeline and never reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// A per-trip refresh task panicked or was cancelled
    #[error("trip refresh task failed: {0}")]
    RefreshTask(#[from] tokio::task::JoinError),

    /// Refreshing all trips took longer than allowed
    #[error("refreshing saved trips timed out after {0:?}")]
    Timeout(Duration),

    /// The client's cached trips could not be read
    #[error("cached trips could not be read: {0}")]
    ClientCache(#[from] serde_json::Error),
}
