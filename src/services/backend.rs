use crate::error::Result;
use crate::models::{Coordinate, RouteCandidate};
use async_trait::async_trait;

/// Routing backend collaborator: given start, an optional forced
/// intermediate stop, and end, returns zero or more candidate paths.
///
/// An empty vec is a legitimate answer (the backend cannot connect the two
/// points by road); an `Err` covers transport failures and malformed
/// payloads. Callers in the planning pipeline treat both the same way:
/// zero candidates from that query, pipeline continues.
#[async_trait]
pub trait RoutingBackend: Send + Sync {
    async fn fetch_candidates(
        &self,
        start: Coordinate,
        end: Coordinate,
        via: Option<Coordinate>,
        alternatives: u32,
    ) -> Result<Vec<RouteCandidate>>;
}

/// Nearest-road lookup collaborator: a corrected coordinate or failure.
#[async_trait]
pub trait NearestRoadLookup: Send + Sync {
    async fn nearest_road(&self, coord: Coordinate) -> Result<Coordinate>;
}
