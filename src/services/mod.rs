pub mod backend;
pub mod geocoding;
pub mod osrm;
pub mod route_planner;
pub mod snapping;
