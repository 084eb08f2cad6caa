//! Liveness endpoint.

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

/// Which storage backend the process is running against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: StorageBackend,
}

/// GET /health
pub async fn health(State(storage): State<StorageBackend>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage,
    })
}
