//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedForecastClient;
use crate::providers::{GeoNamesClient, HttpProbe, PixabayClient, PositionstackClient};
use crate::trips::{ReconcileConfig, RefreshPipeline, TripService};

/// Trip service wired to the real providers.
pub type LiveTripService =
    TripService<Arc<PixabayClient>, Arc<CachedForecastClient>, HttpProbe>;

/// Shared application state.
///
/// The image and forecast clients are shared between the trip service and
/// the pass-through lookup routes, so both see the same forecast cache.
#[derive(Clone)]
pub struct AppState {
    /// Saved trips and their refresh pipeline
    pub trips: Arc<LiveTripService>,

    pub geonames: Arc<GeoNamesClient>,
    pub positionstack: Arc<PositionstackClient>,
    pub pixabay: Arc<PixabayClient>,

    /// Cached Weatherbit client
    pub weather: Arc<CachedForecastClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        geonames: GeoNamesClient,
        positionstack: PositionstackClient,
        pixabay: PixabayClient,
        weather: CachedForecastClient,
        probe: HttpProbe,
        reconcile: ReconcileConfig,
    ) -> Self {
        let pixabay = Arc::new(pixabay);
        let weather = Arc::new(weather);
        let pipeline = RefreshPipeline::new(Arc::clone(&pixabay), Arc::clone(&weather), probe);

        Self {
            trips: Arc::new(TripService::new(pipeline, reconcile)),
            geonames: Arc::new(geonames),
            positionstack: Arc::new(positionstack),
            pixabay,
            weather,
        }
    }
}
