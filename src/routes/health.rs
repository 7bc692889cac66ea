use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let candidates = state.candidate_service.candidates().await.len();
    let body = json!({
        "status": "ok",
        "candidates": candidates,
    });
    (StatusCode::OK, Json(body))
}
