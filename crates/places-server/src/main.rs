mod config;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use places_api::service::PlacesService;
use places_api::{AppState, AppStateInner};
use places_db::Database;
use places_geo::NominatimGeocoder;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "places=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let db = Database::open(&config.db_path)?;
    let geocoder = NominatimGeocoder::new(
        &config.geocoder_url,
        &config.user_agent,
        config.geocoder_timeout,
    )?;
    info!("Geocoding via {}", config.geocoder_url);

    let state: AppState = Arc::new(AppStateInner {
        service: PlacesService::new(Arc::new(db), Arc::new(geocoder)),
    });

    let app = places_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("Places server listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
