pub mod debug;
pub mod route;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/route", post(route::plan_route))
        .route("/route-coords", post(route::plan_route_coords))
        .route("/health", get(debug::health_check))
        .with_state(state)
}
