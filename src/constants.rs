//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For tuning knobs that benefit from runtime experimentation, see
//! [`RoutePlannerConfig`](crate::config::RoutePlannerConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Upstream service defaults (overridden by env vars) ---

/// Default OSRM driving-profile route endpoint. Overridden by `OSRM_ROUTE_URL`.
pub const DEFAULT_OSRM_ROUTE_URL: &str = "https://router.project-osrm.org/route/v1/driving";
/// Default OSRM nearest-road endpoint. Overridden by `OSRM_NEAREST_URL`.
pub const DEFAULT_OSRM_NEAREST_URL: &str = "https://router.project-osrm.org/nearest/v1/driving";
/// Default Nominatim search endpoint. Overridden by `NOMINATIM_URL`.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
/// Default Photon (Komoot) geocoding endpoint. Overridden by `PHOTON_URL`.
pub const DEFAULT_PHOTON_URL: &str = "https://photon.komoot.io/api";
/// User-Agent sent to public OSM infrastructure, which requires one.
/// Overridden by `HTTP_USER_AGENT`.
pub const DEFAULT_USER_AGENT: &str = "altroute/0.1 (+https://github.com/altroute)";

// --- Upstream call timeouts (seconds) ---

/// Timeout for nearest-road snap lookups. Snapping is best-effort, so the
/// budget is tight.
pub const SNAP_TIMEOUT_SECS: u64 = 6;
/// Timeout for route queries against the routing backend.
pub const ROUTE_TIMEOUT_SECS: u64 = 18;
/// Timeout for geocoding queries.
pub const GEOCODE_TIMEOUT_SECS: u64 = 18;

// --- Geodesy ---

/// Mean Earth radius (meters), used by the haversine distance.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
/// Kilometers per degree of latitude. Trip length for regime selection is a
/// planar degree-space estimate scaled by this factor; it diverges from the
/// great-circle distance at large extents and high latitudes, which is
/// acceptable for bucketing but not for display.
pub const KM_PER_DEGREE: f64 = 111.0;

// --- Road snapping ---

/// Snapped points farther than this from the input coordinate are rejected
/// as bad matches. Overridden by `SNAP_MAX_OFFSET_M` (validated 0..1000).
pub const DEFAULT_SNAP_MAX_OFFSET_METERS: f64 = 300.0;

// --- Trip-length regimes (km) ---
// Strict partition on estimated trip length. Each regime selects a distinct
// via-point sampling pattern and a distance-derived result cap.

/// Upper bound of the micro regime (street-level alternatives).
pub const MICRO_TRIP_MAX_KM: f64 = 2.0;
/// Upper bound of the city regime (radial ring sampling).
pub const CITY_TRIP_MAX_KM: f64 = 15.0;
/// Upper bound of the medium regime; above this, trips are long.
pub const MEDIUM_TRIP_MAX_KM: f64 = 80.0;

// --- Result caps per regime ---

/// Result cap for trips under [`CITY_TRIP_MAX_KM`].
pub const ROUTE_CAP_CITY: usize = 5;
/// Result cap for trips under [`MEDIUM_TRIP_MAX_KM`].
pub const ROUTE_CAP_MEDIUM: usize = 4;
/// Result cap for long trips.
pub const ROUTE_CAP_LONG: usize = 3;
/// Default for a caller that does not specify `max_routes`.
pub const DEFAULT_MAX_ROUTES: usize = 5;

// --- Candidate pool collection ---

/// Pool target = result cap x this factor. Once the pool reaches the target,
/// no further via-point queries are issued.
pub const DEFAULT_POOL_TARGET_FACTOR: usize = 6;
/// Backend-native alternatives requested on the direct (no-via) query.
pub const DEFAULT_DIRECT_ALTERNATIVES: u32 = 3;
/// Backend-native alternatives requested per via-point query.
pub const DEFAULT_VIA_ALTERNATIVES: u32 = 2;

// --- Deduplication thresholds ---
// Two routes are near-duplicates when distance, duration AND geometry point
// count all fall inside the tolerances. Below the short-route cutoff an
// absolute distance floor replaces the relative distance test: an 80 m
// difference on an 800 m trip is 10% yet clearly a different street.

/// Routes below this distance (meters) use the short-route rule.
pub const SHORT_ROUTE_CUTOFF_METERS: f64 = 3_000.0;
/// Absolute distance floor (meters) for the short-route rule.
pub const SHORT_ABS_DISTANCE_FLOOR_METERS: f64 = 120.0;
/// Relative duration tolerance for the short-route rule.
pub const SHORT_DURATION_TOLERANCE: f64 = 0.06;
/// Relative geometry point-count tolerance for the short-route rule.
pub const SHORT_GEOMETRY_TOLERANCE: f64 = 0.10;
/// Relative distance tolerance for the standard rule.
pub const DISTANCE_TOLERANCE: f64 = 0.04;
/// Relative duration tolerance for the standard rule.
pub const DURATION_TOLERANCE: f64 = 0.04;
/// Relative geometry point-count tolerance for the standard rule.
pub const GEOMETRY_TOLERANCE: f64 = 0.08;

// --- Scoring weights ---
// Weighted multi-criteria score: time efficiency, distance/fuel, the road
// safety heuristic, and route simplicity. Must sum to 1.0.

/// Weight of the time-efficiency sub-score.
pub const WEIGHT_TIME: f64 = 0.40;
/// Weight of the distance sub-score.
pub const WEIGHT_DISTANCE: f64 = 0.30;
/// Weight of the normalized safety heuristic.
pub const WEIGHT_SAFETY: f64 = 0.20;
/// Weight of the simplicity (point-count) sub-score.
pub const WEIGHT_SIMPLICITY: f64 = 0.10;
/// Routes whose raw safety value is within this relative fraction of the
/// set maximum receive the `safest` tag.
pub const SAFEST_TAG_TOLERANCE: f64 = 0.03;
/// Divisor guard for the scoring ratios.
pub const SCORE_EPSILON: f64 = 1e-9;
/// Display scale applied to the raw weighted score. Purely cosmetic; only
/// the ordering is meaningful.
pub const SCORE_DISPLAY_SCALE: f64 = 1e5;

// --- Geocoding bias ---

/// Half-width (degrees) of the viewbox used for search biased around the
/// caller's position; roughly a metro area.
pub const GEOCODE_VIEWBOX_DEGREES: f64 = 0.22;
/// Biased results farther than this from the caller (meters) are discarded
/// in favor of the unbiased fallback chain.
pub const GEOCODE_BIAS_MAX_METERS: f64 = 50_000.0;
/// Result limit for biased geocoding queries.
pub const GEOCODE_BIASED_LIMIT: u32 = 3;
