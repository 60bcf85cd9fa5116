//! Liveness and readiness probes.
//!
//! These sit at the server root, outside the versioned API, and are not part
//! of the OpenAPI surface; they exist for orchestration.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub version: String,
    /// Titles currently in the catalog
    pub catalog_size: usize,
    /// Open borrow records
    pub open_loans: usize,
}

/// Liveness: the process answers
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness: there is no external collaborator to wait for, so this takes a
/// read pass over the store and reports what it holds.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    let (catalog_size, open_loans) = state.services.stats.store_counts();
    Json(ReadyResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size,
        open_loans,
    })
}
