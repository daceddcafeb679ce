use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub osrm_route_url: String,
    pub osrm_nearest_url: String,
    pub nominatim_url: String,
    pub photon_url: String,
    pub user_agent: String,
    pub planner: RoutePlannerConfig,
}

#[derive(Debug, Clone)]
pub struct RoutePlannerConfig {
    /// Snapped points farther than this (meters) from the input coordinate
    /// are rejected as bad matches and the original coordinate is kept.
    pub snap_max_offset_m: f64,

    /// Backend-native alternatives requested on the direct (no-via) query.
    pub direct_alternatives: u32,

    /// Backend-native alternatives requested per via-point query.
    pub via_alternatives: u32,

    /// Candidate pool target as a multiple of the result cap. Via-point
    /// queries stop once the pool reaches cap x factor.
    pub pool_target_factor: usize,
}

impl Default for RoutePlannerConfig {
    fn default() -> Self {
        Self {
            snap_max_offset_m: DEFAULT_SNAP_MAX_OFFSET_METERS,
            direct_alternatives: DEFAULT_DIRECT_ALTERNATIVES,
            via_alternatives: DEFAULT_VIA_ALTERNATIVES,
            pool_target_factor: DEFAULT_POOL_TARGET_FACTOR,
        }
    }
}

impl RoutePlannerConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let snap_max_offset_m: f64 = env::var("SNAP_MAX_OFFSET_M")
            .unwrap_or_else(|_| defaults.snap_max_offset_m.to_string())
            .parse()
            .map_err(|_| "Invalid SNAP_MAX_OFFSET_M")?;

        if snap_max_offset_m <= 0.0 || snap_max_offset_m > 1000.0 {
            return Err("SNAP_MAX_OFFSET_M must be between 0 and 1000 meters".to_string());
        }

        Ok(Self {
            snap_max_offset_m,

            direct_alternatives: env::var("PLANNER_DIRECT_ALTERNATIVES")
                .unwrap_or_else(|_| defaults.direct_alternatives.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_DIRECT_ALTERNATIVES")?,

            via_alternatives: env::var("PLANNER_VIA_ALTERNATIVES")
                .unwrap_or_else(|_| defaults.via_alternatives.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_VIA_ALTERNATIVES")?,

            pool_target_factor: env::var("PLANNER_POOL_TARGET_FACTOR")
                .unwrap_or_else(|_| defaults.pool_target_factor.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_POOL_TARGET_FACTOR")?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            osrm_route_url: env::var("OSRM_ROUTE_URL")
                .unwrap_or_else(|_| DEFAULT_OSRM_ROUTE_URL.to_string()),
            osrm_nearest_url: env::var("OSRM_NEAREST_URL")
                .unwrap_or_else(|_| DEFAULT_OSRM_NEAREST_URL.to_string()),
            nominatim_url: env::var("NOMINATIM_URL")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_string()),
            photon_url: env::var("PHOTON_URL").unwrap_or_else(|_| DEFAULT_PHOTON_URL.to_string()),
            user_agent: env::var("HTTP_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            planner: RoutePlannerConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
