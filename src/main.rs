use altroute::config::Config;
use altroute::services::geocoding::GeocodingClient;
use altroute::services::osrm::OsrmClient;
use altroute::services::route_planner::RoutePlanner;
use altroute::services::snapping::RoadSnapper;
use altroute::AppState;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "altroute=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting altroute API server");

    // Initialize services. The OSRM client serves both as the routing
    // backend and as the nearest-road lookup for snapping.
    let osrm = Arc::new(OsrmClient::new(
        config.osrm_route_url.clone(),
        config.osrm_nearest_url.clone(),
        config.user_agent.clone(),
    ));
    let snapper = RoadSnapper::new(osrm.clone(), config.planner.snap_max_offset_m);
    let planner = RoutePlanner::new(osrm, snapper, config.planner.clone());
    let geocoder = GeocodingClient::new(
        config.nominatim_url.clone(),
        config.photon_url.clone(),
        config.user_agent.clone(),
    );

    // Create application state
    let state = Arc::new(AppState { planner, geocoder });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", altroute::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
