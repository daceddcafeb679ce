mod dedup;
pub mod scoring;
pub mod via_points;

pub use dedup::dedupe;
pub use scoring::score_routes;

use crate::config::RoutePlannerConfig;
use crate::constants::{
    CITY_TRIP_MAX_KM, KM_PER_DEGREE, MEDIUM_TRIP_MAX_KM, ROUTE_CAP_CITY, ROUTE_CAP_LONG,
    ROUTE_CAP_MEDIUM,
};
use crate::models::{Coordinate, RouteCandidate};
use crate::services::backend::RoutingBackend;
use crate::services::snapping::RoadSnapper;
use std::sync::Arc;

/// Orchestrates candidate collection for one routing request: snap the
/// endpoints, probe the backend directly and through sampled via-points,
/// deduplicate the pool, and return the fastest survivors.
///
/// Fully stateless across requests; every backend call is independently
/// best-effort and the pipeline degrades toward fewer candidates or an
/// empty result rather than failing.
pub struct RoutePlanner {
    backend: Arc<dyn RoutingBackend>,
    snapper: RoadSnapper,
    config: RoutePlannerConfig,
}

impl RoutePlanner {
    pub fn new(
        backend: Arc<dyn RoutingBackend>,
        snapper: RoadSnapper,
        config: RoutePlannerConfig,
    ) -> Self {
        RoutePlanner {
            backend,
            snapper,
            config,
        }
    }

    /// Fetch up to `max_routes` distinct candidates, sorted fastest first.
    /// An empty result means the backend could not connect the two points
    /// by road; it is a legitimate outcome, not an error.
    pub async fn fetch_routes(
        &self,
        start: Coordinate,
        end: Coordinate,
        max_routes: usize,
    ) -> Vec<RouteCandidate> {
        // Snap both endpoints to the road network; each snap is
        // independently best-effort.
        let (start, end) =
            futures::future::join(self.snapper.snap(start), self.snapper.snap(end)).await;

        let trip_km = Self::trip_length_km(&start, &end);
        let cap = Self::result_cap(trip_km, max_routes);
        let pool_target = cap * self.config.pool_target_factor;

        tracing::info!(
            trip_km = %format!("{:.1}", trip_km),
            cap = cap,
            "Fetching routes: estimated {:.1}km, cap {}",
            trip_km,
            cap
        );

        let mut pool: Vec<RouteCandidate> = Vec::new();

        // Direct query first: the backend's own alternatives seed the pool.
        match self
            .backend
            .fetch_candidates(start, end, None, self.config.direct_alternatives)
            .await
        {
            Ok(routes) => {
                tracing::debug!("Direct query: {} candidate(s)", routes.len());
                pool.extend(routes);
            }
            Err(e) => tracing::warn!("Direct route query failed: {}", e),
        }

        // Via-point queries in sampler order. The pool target is checked
        // after each query; via-point queries run sequentially so the
        // early stop sees every result collected so far.
        let vias = via_points::via_points(&start, &end, trip_km);
        for (idx, via) in vias.into_iter().enumerate() {
            match self
                .backend
                .fetch_candidates(start, end, Some(via.clamped()), self.config.via_alternatives)
                .await
            {
                Ok(routes) => {
                    tracing::debug!(
                        "Via {}: {} candidate(s), pool {}",
                        idx + 1,
                        routes.len(),
                        pool.len() + routes.len()
                    );
                    pool.extend(routes);
                }
                Err(e) => tracing::debug!("Via query {} failed: {}", idx + 1, e),
            }

            if pool.len() >= pool_target {
                tracing::debug!(
                    pool = pool.len(),
                    target = pool_target,
                    "Pool target reached after via {}",
                    idx + 1
                );
                break;
            }
        }

        let pool_size = pool.len();
        let mut unique = dedup::dedupe(pool);

        unique.sort_by(|a, b| {
            a.duration_seconds
                .partial_cmp(&b.duration_seconds)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        unique.truncate(cap);

        tracing::info!(
            "Final: {} unique route(s) from {} candidates",
            unique.len(),
            pool_size
        );
        unique
    }

    /// Estimated trip length for regime selection: planar degree-space
    /// distance scaled by 111 km/degree. Coarser than the great-circle
    /// distance at large extents and high latitudes, but cheap and good
    /// enough for bucketing; never used for display.
    fn trip_length_km(start: &Coordinate, end: &Coordinate) -> f64 {
        let dlat = end.lat - start.lat;
        let dlon = end.lon - start.lon;
        (dlat * dlat + dlon * dlon).sqrt() * KM_PER_DEGREE
    }

    /// Distance-derived result cap, further limited by the caller's
    /// requested maximum. Short trips have more genuinely distinct street
    /// alternatives than highway corridors do.
    fn result_cap(trip_km: f64, max_routes: usize) -> usize {
        let regime_cap = if trip_km < CITY_TRIP_MAX_KM {
            ROUTE_CAP_CITY
        } else if trip_km < MEDIUM_TRIP_MAX_KM {
            ROUTE_CAP_MEDIUM
        } else {
            ROUTE_CAP_LONG
        };
        regime_cap.min(max_routes)
    }
}
