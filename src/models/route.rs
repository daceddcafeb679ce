use crate::constants::DEFAULT_MAX_ROUTES;
use crate::models::Coordinate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single candidate returned by one routing-backend query.
///
/// `geometry` is the travel path as GeoJSON `[lon, lat]` pairs, start to
/// end. Candidates with empty geometry are invalid and are dropped while
/// parsing the backend response, before they can enter the pool. Candidates
/// are never mutated after construction; scoring produces new
/// [`ScoredRoute`] values.
#[derive(Debug, Clone)]
pub struct RouteCandidate {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Vec<[f64; 2]>,
}

impl RouteCandidate {
    /// Geometry point count, used as a cheap shape proxy by deduplication
    /// and as a turn-density proxy by scoring.
    pub fn point_count(&self) -> usize {
        self.geometry.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteTag {
    Best,
    Fastest,
    Shortest,
    Safest,
}

/// A ranked route as served to the client. The raw safety heuristic used
/// for tagging is internal to the scorer and never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRoute {
    pub id: Uuid,
    pub distance_km: f64,
    pub duration_min: f64,
    pub score: f64,
    /// GeoJSON LineString path as [lon, lat] pairs
    pub geometry: Vec<[f64; 2]>,
    /// True for exactly one route per non-empty result: the top scorer
    pub recommended: bool,
    pub tags: Vec<RouteTag>,
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub start_lat: f64,
    pub start_lon: f64,
    pub destination: String,
    #[serde(default = "default_max_routes")]
    pub max_routes: usize,
}

#[derive(Debug, Deserialize)]
pub struct CoordRouteRequest {
    pub start_lat: f64,
    pub start_lon: f64,
    pub dest_lat: f64,
    pub dest_lon: f64,
    #[serde(default = "default_max_routes")]
    pub max_routes: usize,
}

fn default_max_routes() -> usize {
    DEFAULT_MAX_ROUTES
}

impl RouteRequest {
    pub fn validate(&self) -> Result<(), String> {
        Coordinate::new(self.start_lat, self.start_lon)?;
        if self.destination.trim().is_empty() {
            return Err("destination cannot be empty".to_string());
        }
        if self.destination.len() > 200 {
            return Err("destination must be at most 200 characters".to_string());
        }
        if self.max_routes == 0 {
            return Err("max_routes must be at least 1".to_string());
        }
        Ok(())
    }
}

impl CoordRouteRequest {
    pub fn validate(&self) -> Result<(), String> {
        Coordinate::new(self.start_lat, self.start_lon)?;
        Coordinate::new(self.dest_lat, self.dest_lon)?;
        if self.max_routes == 0 {
            return Err("max_routes must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub routes: Vec<ScoredRoute>,
    pub destination: Coordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_request_validation() {
        let mut req = RouteRequest {
            start_lat: 12.9716,
            start_lon: 77.5946,
            destination: "Central Station".to_string(),
            max_routes: 5,
        };
        assert!(req.validate().is_ok());

        req.start_lat = 95.0;
        assert!(req.validate().is_err());

        req.start_lat = 12.9716;
        req.destination = "   ".to_string();
        assert!(req.validate().is_err());

        req.destination = "x".repeat(201);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_coord_route_request_validation() {
        let mut req = CoordRouteRequest {
            start_lat: 12.9716,
            start_lon: 77.5946,
            dest_lat: 13.0827,
            dest_lon: 80.2707,
            max_routes: 3,
        };
        assert!(req.validate().is_ok());

        req.dest_lon = 185.0;
        assert!(req.validate().is_err());

        req.dest_lon = 80.2707;
        req.max_routes = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_route_tag_serialization() {
        assert_eq!(serde_json::to_string(&RouteTag::Best).unwrap(), "\"best\"");
        assert_eq!(
            serde_json::to_string(&RouteTag::Fastest).unwrap(),
            "\"fastest\""
        );
        assert_eq!(
            serde_json::to_string(&RouteTag::Shortest).unwrap(),
            "\"shortest\""
        );
        assert_eq!(
            serde_json::to_string(&RouteTag::Safest).unwrap(),
            "\"safest\""
        );
    }

    #[test]
    fn test_max_routes_default() {
        let req: CoordRouteRequest = serde_json::from_str(
            r#"{"start_lat": 12.9, "start_lon": 77.5, "dest_lat": 13.0, "dest_lon": 77.6}"#,
        )
        .unwrap();
        assert_eq!(req.max_routes, 5);
    }

    #[test]
    fn test_point_count() {
        let candidate = RouteCandidate {
            distance_meters: 1200.0,
            duration_seconds: 300.0,
            geometry: vec![[77.59, 12.97], [77.60, 12.98], [77.61, 12.99]],
        };
        assert_eq!(candidate.point_count(), 3);
    }
}
