//! Choosing and refreshing the authoritative trip list.

use std::sync::Arc;

use futures::{StreamExt, TryStreamExt, stream};
use tokio::task::AbortHandle;
use tracing::{error, info};

use crate::domain::{DateWindow, Trip};

use super::config::ReconcileConfig;
use super::error::TripError;
use super::refresh::{ForecastSource, RefreshPipeline, ThumbnailSource, UrlProbe};
use super::store::TripStore;

/// Where the authoritative list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripSource {
    /// The server already held trips
    Server,
    /// The server was empty; the client's cache was used
    ClientCache,
    /// Neither side had anything
    Empty,
}

/// Pick the authoritative list.
///
/// A non-empty server store always wins. The client cache only seeds a
/// cold server.
pub fn choose_authoritative(
    server: Vec<Trip>,
    client_cache: Option<Vec<Trip>>,
) -> (Vec<Trip>, TripSource) {
    if !server.is_empty() {
        return (server, TripSource::Server);
    }
    match client_cache {
        Some(cache) => (cache, TripSource::ClientCache),
        None => (Vec::new(), TripSource::Empty),
    }
}

/// Runs reconciliation against a [`TripStore`].
pub struct Reconciler<T, F, P> {
    pipeline: Arc<RefreshPipeline<T, F, P>>,
    config: ReconcileConfig,
}

impl<T, F, P> Reconciler<T, F, P>
where
    T: ThumbnailSource + 'static,
    F: ForecastSource + 'static,
    P: UrlProbe + 'static,
{
    pub fn new(pipeline: RefreshPipeline<T, F, P>, config: ReconcileConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            config,
        }
    }

    /// Refresh every trip, at most `concurrency` at a time.
    ///
    /// The result is in input order, whatever order the refreshes finish in.
    /// On failure or timeout every refresh still running is aborted.
    pub async fn refresh_all(
        &self,
        trips: Vec<Trip>,
        window: DateWindow,
    ) -> Result<Vec<Trip>, TripError> {
        let mut running: Vec<AbortHandle> = Vec::with_capacity(trips.len());
        let refreshes = stream::iter(trips)
            .map(|trip| {
                let pipeline = Arc::clone(&self.pipeline);
                let handle = tokio::spawn(async move { pipeline.refresh(trip, &window).await });
                running.push(handle.abort_handle());
                handle
            })
            .buffered(self.config.concurrency.max(1))
            .map_err(TripError::from)
            .try_collect::<Vec<Trip>>();

        let outcome = tokio::time::timeout(self.config.timeout(), refreshes)
            .await
            .map_err(|_| TripError::Timeout(self.config.timeout()))
            .and_then(|collected| collected);

        if outcome.is_err() {
            for handle in &running {
                handle.abort();
            }
        }
        outcome
    }

    /// Establish the authoritative list, refresh it, and store it.
    ///
    /// On failure the store is emptied rather than left half-updated.
    pub async fn reconcile(
        &self,
        store: &TripStore,
        client_cache: Option<Vec<Trip>>,
        window: DateWindow,
    ) -> Result<Vec<Trip>, TripError> {
        self.reconcile_with(store, || Ok(client_cache), window).await
    }

    /// Like [`Reconciler::reconcile`], but the client cache is only loaded
    /// when the server holds no trips. A cache that fails to load counts as
    /// a reconciliation failure.
    pub async fn reconcile_with<L>(
        &self,
        store: &TripStore,
        load_client_cache: L,
        window: DateWindow,
    ) -> Result<Vec<Trip>, TripError>
    where
        L: FnOnce() -> Result<Option<Vec<Trip>>, TripError>,
    {
        let server = store.list().await;
        let client_cache = if server.is_empty() {
            load_client_cache()
        } else {
            Ok(None)
        };

        let result = match client_cache {
            Ok(client_cache) => {
                let (authoritative, source) = choose_authoritative(server, client_cache);
                info!(?source, trips = authoritative.len(), "Restoring saved trips");
                self.refresh_all(authoritative, window).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(refreshed) => {
                store.replace_all(refreshed.clone()).await;
                Ok(refreshed)
            }
            Err(e) => {
                error!(error = %e, "Restoring saved trips failed, clearing the store");
                store.clear().await;
                Err(e)
            }
        }
    }
}
