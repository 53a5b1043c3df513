//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let clients = state.session_manager.client_count().await;
    Json(serde_json::json!({"status": "ok", "clients": clients}))
}
