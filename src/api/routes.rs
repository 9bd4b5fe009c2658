//! Application route configuration.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::handlers::user_routes;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness endpoint
async fn root() -> &'static str {
    "Friends API is running"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    storage: StorageHealth,
}

#[derive(Serialize)]
struct StorageHealth {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health endpoint: probes the storage backend and degrades the overall
/// status when the probe fails.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let probe = state.repository.ping().await;

    let (status_code, status, storage) = match probe {
        Ok(()) => (
            StatusCode::OK,
            "healthy",
            StorageHealth {
                status: "healthy",
                error: None,
            },
        ),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "degraded",
            StorageHealth {
                status: "unhealthy",
                error: Some(error.to_string()),
            },
        ),
    };

    (status_code, Json(HealthResponse { status, storage }))
}
