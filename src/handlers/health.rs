use axum::response::Json;
use serde_json::{json, Value};

/// GET /health - Liveness check; touches no store
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now()
        }
    }))
}
