use axum::Json;
use serde_json::{json, Value};

/// GET /health - liveness probe. The service holds no connections or
/// state of its own, so there is nothing deeper to check.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
