//! The operations offered to the request layer.

use serde_json::Value;

use crate::domain::{DateWindow, Trip, TripId};

use super::config::ReconcileConfig;
use super::error::TripError;
use super::ordering::order_for_display;
use super::reconcile::Reconciler;
use super::refresh::{ForecastSource, RefreshPipeline, ThumbnailSource, UrlProbe};
use super::store::TripStore;

/// Saved-trip operations over a single shared store.
pub struct TripService<T, F, P> {
    store: TripStore,
    reconciler: Reconciler<T, F, P>,
}

impl<T, F, P> TripService<T, F, P>
where
    T: ThumbnailSource + 'static,
    F: ForecastSource + 'static,
    P: UrlProbe + 'static,
{
    /// Create a service with an empty store.
    pub fn new(pipeline: RefreshPipeline<T, F, P>, config: ReconcileConfig) -> Self {
        Self {
            store: TripStore::new(),
            reconciler: Reconciler::new(pipeline, config),
        }
    }

    /// Save a trip, replacing any trip with the same id.
    pub async fn add_trip(&self, trip: Trip) -> Vec<Trip> {
        self.store.add(trip).await
    }

    /// Remove a trip. Unknown ids are ignored.
    pub async fn remove_trip(&self, id: &TripId) -> Vec<Trip> {
        self.store.remove(id).await
    }

    /// Reconcile with the client's cached trips and refresh the result.
    ///
    /// The returned list is in the order of the authoritative set.
    pub async fn restore(
        &self,
        client_cache: Option<Vec<Trip>>,
        window: DateWindow,
    ) -> Result<Vec<Trip>, TripError> {
        self.reconciler
            .reconcile(&self.store, client_cache, window)
            .await
    }

    /// Restore from the client's cache as sent on the wire.
    ///
    /// The cache is only parsed when the server holds no trips, so a stale
    /// entry cannot disturb a server whose list already wins.
    pub async fn restore_from_json(
        &self,
        client_cache: Option<Vec<Value>>,
        window: DateWindow,
    ) -> Result<Vec<Trip>, TripError> {
        let load = || {
            client_cache
                .map(|raw| {
                    raw.into_iter()
                        .map(serde_json::from_value::<Trip>)
                        .collect::<Result<Vec<_>, _>>()
                })
                .transpose()
                .map_err(TripError::from)
        };
        self.reconciler
            .reconcile_with(&self.store, load, window)
            .await
    }

    /// Saved trips in display order.
    pub async fn saved_trips(&self, window: &DateWindow) -> Vec<Trip> {
        order_for_display(self.store.list().await, window)
    }

    /// Order any list of trips for display.
    pub fn order_for_display(&self, trips: Vec<Trip>, window: &DateWindow) -> Vec<Trip> {
        order_for_display(trips, window)
    }

    /// Access the underlying store.
    pub fn store(&self) -> &TripStore {
        &self.store
    }
}
