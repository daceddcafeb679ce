use altroute::config::RoutePlannerConfig;
use altroute::error::{AppError, Result};
use altroute::models::{Coordinate, RouteCandidate};
use altroute::services::backend::{NearestRoadLookup, RoutingBackend};
use altroute::services::route_planner::RoutePlanner;
use altroute::services::snapping::RoadSnapper;
use async_trait::async_trait;
use std::sync::Arc;

/// Backend stub that answers every query with the same candidate batch.
#[allow(dead_code)]
pub struct ScriptedBackend {
    pub batch: Vec<RouteCandidate>,
}

#[async_trait]
impl RoutingBackend for ScriptedBackend {
    async fn fetch_candidates(
        &self,
        _start: Coordinate,
        _end: Coordinate,
        _via: Option<Coordinate>,
        _alternatives: u32,
    ) -> Result<Vec<RouteCandidate>> {
        Ok(self.batch.clone())
    }
}

/// Nearest-road stub that always fails, so snapping keeps the input.
#[allow(dead_code)]
pub struct OfflineLookup;

#[async_trait]
impl NearestRoadLookup for OfflineLookup {
    async fn nearest_road(&self, _coord: Coordinate) -> Result<Coordinate> {
        Err(AppError::RoutingApi("offline".to_string()))
    }
}

#[allow(dead_code)]
pub fn make_candidate(distance_m: f64, duration_s: f64, points: usize) -> RouteCandidate {
    RouteCandidate {
        distance_meters: distance_m,
        duration_seconds: duration_s,
        geometry: vec![[77.59, 12.97]; points],
    }
}

/// Planner wired to a scripted backend and an offline snapper.
#[allow(dead_code)]
pub fn make_planner(batch: Vec<RouteCandidate>) -> RoutePlanner {
    let backend = Arc::new(ScriptedBackend { batch });
    let snapper = RoadSnapper::new(Arc::new(OfflineLookup), 300.0);
    RoutePlanner::new(backend, snapper, RoutePlannerConfig::default())
}

/// Check if we should skip tests that hit live public services
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok()
}
