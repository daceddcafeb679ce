use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Routing backend error: {0}")]
    RoutingApi(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("No route found: {0}")]
    NoRouteFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses. "No route found" and "location not
// found" are distinct client-visible outcomes, not internal errors.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::RoutingApi(ref e) => {
                tracing::error!("Routing backend error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error")
            }
            AppError::Geocoding(ref e) => {
                tracing::warn!("Geocoding error: {}", e);
                (StatusCode::BAD_GATEWAY, "Geocoding service error")
            }
            AppError::LocationNotFound(ref e) => (StatusCode::NOT_FOUND, e.as_str()),
            AppError::NoRouteFound(ref e) => {
                tracing::info!("No route found: {}", e);
                (StatusCode::BAD_GATEWAY, e.as_str())
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
