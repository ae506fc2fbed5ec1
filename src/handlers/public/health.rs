// handlers/public/health.rs - GET /health handler

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health - liveness plus reachability of both database bindings
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();
    let (primary, replica) = state.db.health_check().await;

    let describe = |result: &Result<(), crate::database::DatabaseError>| match result {
        Ok(()) => json!("ok"),
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            json!("unavailable")
        }
    };

    let status = if primary.is_ok() && replica.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let label = if status == StatusCode::OK { "ok" } else { "degraded" };

    (
        status,
        Json(json!({
            "status": label,
            "timestamp": now,
            "database": {
                "primary": describe(&primary),
                "replica": describe(&replica),
            }
        })),
    )
}
