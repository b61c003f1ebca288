use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - service name, version and resource index
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Task Board API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "accounts": "/api/v1/users, /api/v1/sessions",
            "posts": "/api/v1/posts[/:id] (writes require Basic auth)",
            "todos": "/api/v1/todos[/:id]",
            "contacts": "/api/v1/contacts[/:id]",
            "board": "/api/v1/{projects,issues,tags,milestones,efforts,columns}[/:id]",
            "health": "/health",
        }
    }))
}

/// GET /health - database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
