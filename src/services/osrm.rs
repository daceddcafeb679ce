use crate::constants::{ROUTE_TIMEOUT_SECS, SNAP_TIMEOUT_SECS};
use crate::error::{AppError, Result};
use crate::models::{Coordinate, RouteCandidate};
use crate::services::backend::{NearestRoadLookup, RoutingBackend};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Client for the OSRM HTTP API: the `/route` service for candidate paths
/// and the `/nearest` service for road snapping.
#[derive(Clone)]
pub struct OsrmClient {
    client: Client,
    route_url: String,
    nearest_url: String,
    user_agent: String,
}

impl OsrmClient {
    pub fn new(route_url: String, nearest_url: String, user_agent: String) -> Self {
        OsrmClient {
            client: Client::new(),
            route_url,
            nearest_url,
            user_agent,
        }
    }

    /// Format a waypoint sequence the way OSRM expects: `lon,lat;lon,lat`.
    fn coordinate_path(start: &Coordinate, via: Option<&Coordinate>, end: &Coordinate) -> String {
        match via {
            Some(v) => format!(
                "{},{};{},{};{},{}",
                start.lon, start.lat, v.lon, v.lat, end.lon, end.lat
            ),
            None => format!("{},{};{},{}", start.lon, start.lat, end.lon, end.lat),
        }
    }
}

#[async_trait]
impl RoutingBackend for OsrmClient {
    /// Query the route service for up to `alternatives` candidate paths.
    /// Full-overview GeoJSON geometry, no turn-by-turn steps.
    async fn fetch_candidates(
        &self,
        start: Coordinate,
        end: Coordinate,
        via: Option<Coordinate>,
        alternatives: u32,
    ) -> Result<Vec<RouteCandidate>> {
        let url = format!(
            "{}/{}",
            self.route_url,
            Self::coordinate_path(&start, via.as_ref(), &end)
        );

        tracing::debug!(
            via = via.is_some(),
            alternatives = alternatives,
            "OSRM route request: via={}, alternatives={}",
            via.is_some(),
            alternatives
        );

        let alternatives_param = alternatives.to_string();
        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("overview", "full"),
                ("alternatives", alternatives_param.as_str()),
                ("geometries", "geojson"),
                ("steps", "false"),
            ])
            .timeout(Duration::from_secs(ROUTE_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| AppError::RoutingApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::RoutingApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: OsrmRouteResponse = response
            .json()
            .await
            .map_err(|e| AppError::RoutingApi(format!("Failed to parse response: {}", e)))?;

        if body.code != "Ok" {
            return Err(AppError::RoutingApi(format!(
                "Backend returned code {}",
                body.code
            )));
        }

        Ok(candidates_from_response(body))
    }
}

#[async_trait]
impl NearestRoadLookup for OsrmClient {
    /// Query the nearest service for the closest routable point.
    async fn nearest_road(&self, coord: Coordinate) -> Result<Coordinate> {
        let url = format!("{}/{},{}", self.nearest_url, coord.lon, coord.lat);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[("number", "1")])
            .timeout(Duration::from_secs(SNAP_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| AppError::RoutingApi(format!("Nearest request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::RoutingApi(format!(
                "Nearest HTTP {}",
                response.status()
            )));
        }

        let body: OsrmNearestResponse = response
            .json()
            .await
            .map_err(|e| AppError::RoutingApi(format!("Failed to parse nearest response: {}", e)))?;

        if body.code != "Ok" {
            return Err(AppError::RoutingApi(format!(
                "Nearest returned code {}",
                body.code
            )));
        }

        let waypoint = body
            .waypoints
            .first()
            .ok_or_else(|| AppError::RoutingApi("Nearest returned no waypoints".to_string()))?;

        // OSRM locations are [lon, lat]
        Coordinate::new(waypoint.location[1], waypoint.location[0]).map_err(AppError::RoutingApi)
    }
}

/// Convert a parsed route response into candidates, dropping any route
/// with empty geometry before it can enter the candidate pool.
fn candidates_from_response(body: OsrmRouteResponse) -> Vec<RouteCandidate> {
    body.routes
        .into_iter()
        .filter_map(|route| {
            if route.geometry.coordinates.is_empty() {
                tracing::warn!("Dropping backend route with empty geometry");
                return None;
            }
            Some(RouteCandidate {
                distance_meters: route.distance,
                duration_seconds: route.duration,
                geometry: route.geometry.coordinates,
            })
        })
        .collect()
}

// OSRM API response types

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64, // meters
    duration: f64, // seconds
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>, // [lon, lat] pairs
    #[allow(dead_code)]
    #[serde(rename = "type")]
    geometry_type: String,
}

#[derive(Debug, Deserialize)]
struct OsrmNearestResponse {
    code: String,
    #[serde(default)]
    waypoints: Vec<OsrmWaypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmWaypoint {
    location: [f64; 2], // [lon, lat]
}
