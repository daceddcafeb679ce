use crate::error::{AppError, Result};
use crate::models::route::{CoordRouteRequest, RouteRequest, RouteResponse};
use crate::models::Coordinate;
use crate::services::route_planner::score_routes;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /route
/// Geocode a free-text destination, then fetch and score routes from the
/// caller's position.
pub async fn plan_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let destination_query = request.destination.trim();
    tracing::info!(
        lat = request.start_lat,
        lon = request.start_lon,
        "Route request: ({:.4}, {:.4}) -> \"{}\"",
        request.start_lat,
        request.start_lon,
        destination_query
    );

    let start = Coordinate::new(request.start_lat, request.start_lon)
        .map_err(AppError::InvalidRequest)?;

    let destination = state
        .geocoder
        .geocode(destination_query, Some(start))
        .await
        .ok_or_else(|| {
            AppError::LocationNotFound(format!(
                "Location not found: \"{}\". Try a more specific name.",
                destination_query
            ))
        })?;

    let candidates = state
        .planner
        .fetch_routes(start, destination, request.max_routes)
        .await;
    if candidates.is_empty() {
        return Err(AppError::NoRouteFound(
            "No routes found. Locations may be unreachable by road.".to_string(),
        ));
    }

    let routes = score_routes(candidates);
    Ok(Json(RouteResponse {
        routes,
        destination,
    }))
}

/// POST /route-coords
/// Route to a destination already resolved to coordinates.
pub async fn plan_route_coords(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CoordRouteRequest>,
) -> Result<Json<RouteResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let start = Coordinate::new(request.start_lat, request.start_lon)
        .map_err(AppError::InvalidRequest)?;
    let destination =
        Coordinate::new(request.dest_lat, request.dest_lon).map_err(AppError::InvalidRequest)?;

    tracing::info!(
        "Route request: ({:.4}, {:.4}) -> ({:.4}, {:.4})",
        start.lat,
        start.lon,
        destination.lat,
        destination.lon
    );

    let candidates = state
        .planner
        .fetch_routes(start, destination, request.max_routes)
        .await;
    if candidates.is_empty() {
        return Err(AppError::NoRouteFound(
            "No routes found. Location may be unreachable by road.".to_string(),
        ));
    }

    let routes = score_routes(candidates);
    Ok(Json(RouteResponse {
        routes,
        destination,
    }))
}
