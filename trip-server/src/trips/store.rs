//! Process-wide collection of saved trips.

use tokio::sync::RwLock;

use crate::domain::{Trip, TripId};

#[derive(Debug, Default)]
struct StoreState {
    trips: Vec<Trip>,
    revision: u64,
}

/// The server's authoritative list of saved trips.
///
/// Every operation takes the lock for its own duration only, so no lock is
/// ever held across a provider call. Insertion order is preserved; display
/// order is applied separately.
#[derive(Debug, Default)]
pub struct TripStore {
    inner: RwLock<StoreState>,
}

impl TripStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a trip, replacing any existing trip with the same id.
    ///
    /// The trip moves to the end of the list. Returns the updated list.
    pub async fn add(&self, trip: Trip) -> Vec<Trip> {
        let mut state = self.inner.write().await;
        state.trips.retain(|t| t.id != trip.id);
        state.trips.push(trip);
        state.revision += 1;
        state.trips.clone()
    }

    /// Remove the trip with the given id, if present.
    ///
    /// An unknown id is not an error. Returns the updated list.
    pub async fn remove(&self, id: &TripId) -> Vec<Trip> {
        let mut state = self.inner.write().await;
        state.trips.retain(|t| &t.id != id);
        state.revision += 1;
        state.trips.clone()
    }

    /// Overwrite the whole collection.
    pub async fn replace_all(&self, trips: Vec<Trip>) {
        let mut state = self.inner.write().await;
        state.trips = trips;
        state.revision += 1;
    }

    /// Drop every trip.
    pub async fn clear(&self) {
        self.replace_all(Vec::new()).await;
    }

    /// Snapshot of the current collection.
    pub async fn list(&self) -> Vec<Trip> {
        self.inner.read().await.trips.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.trips.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.trips.is_empty()
    }

    /// Number of mutations applied since the store was created.
    pub async fn revision(&self) -> u64 {
        self.inner.read().await.revision
    }
}
