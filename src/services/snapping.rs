use crate::models::Coordinate;
use crate::services::backend::NearestRoadLookup;
use std::sync::Arc;

/// Corrects raw GPS coordinates onto the road network before routing.
/// Coordinates that land in buildings, water, or fields make the routing
/// backend produce wildly wrong paths; snapping them to the nearest
/// routable point fixes that.
#[derive(Clone)]
pub struct RoadSnapper {
    lookup: Arc<dyn NearestRoadLookup>,
    max_offset_m: f64,
}

impl RoadSnapper {
    pub fn new(lookup: Arc<dyn NearestRoadLookup>, max_offset_m: f64) -> Self {
        RoadSnapper {
            lookup,
            max_offset_m,
        }
    }

    /// Snap a coordinate to the nearest routable point. Best-effort: a
    /// failed lookup or a snapped point farther than the offset limit
    /// returns the input unchanged. Never fails the pipeline.
    pub async fn snap(&self, coord: Coordinate) -> Coordinate {
        match self.lookup.nearest_road(coord).await {
            Ok(snapped) => {
                let offset_m = coord.distance_meters(&snapped);
                if offset_m <= self.max_offset_m {
                    tracing::debug!(
                        offset_m = %format!("{:.0}", offset_m),
                        "Snapped ({:.5}, {:.5}) -> ({:.5}, {:.5}), offset {:.0}m",
                        coord.lat,
                        coord.lon,
                        snapped.lat,
                        snapped.lon,
                        offset_m
                    );
                    snapped
                } else {
                    tracing::debug!(
                        offset_m = %format!("{:.0}", offset_m),
                        "Snapped point too far ({:.0}m), keeping original",
                        offset_m
                    );
                    coord
                }
            }
            Err(e) => {
                tracing::warn!("Nearest-road lookup failed: {}, keeping original", e);
                coord
            }
        }
    }
}
