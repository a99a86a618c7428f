use tracing::info;
use tracing_subscriber::EnvFilter;

use trip_server::cache::CachedForecastClient;
use trip_server::config::AppConfig;
use trip_server::providers::{
    GeoNamesClient, HttpProbe, PixabayClient, PositionstackClient, WeatherbitClient,
};
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;

    let geonames = GeoNamesClient::new(config.provider(&config.geonames_username))?;
    let positionstack = PositionstackClient::new(config.provider(&config.positionstack_key))?;
    let pixabay = PixabayClient::new(config.provider(&config.pixabay_key))?;
    let weatherbit = WeatherbitClient::new(config.provider(&config.weatherbit_key))?;
    let weather = CachedForecastClient::new(weatherbit, &config.cache);
    let probe = HttpProbe::new(&config.provider(""))?;

    let state = AppState::new(
        geonames,
        positionstack,
        pixabay,
        weather,
        probe,
        config.reconcile.clone(),
    );
    let app = create_router(state, &config.static_dir);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Travel planner listening on http://{addr}");
    info!("Serving static files from {}", config.static_dir);

    axum::serve(listener, app).await?;
    Ok(())
}
