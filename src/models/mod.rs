pub mod coordinates;
pub mod route;

pub use coordinates::Coordinate;
pub use route::{RouteCandidate, RouteTag, ScoredRoute};
