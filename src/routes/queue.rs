use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{
    dto::candidate_dto::{CandidateListResponse, NextCandidateResponse, QueueStatsResponse},
    error::Result,
    models::candidate::Candidate,
    services::queue_service,
    AppState,
};

async fn project<F>(state: &AppState, view: F) -> CandidateListResponse
where
    F: for<'a> Fn(&'a [Candidate]) -> Vec<&'a Candidate>,
{
    let snapshot = state.candidate_service.candidates().await;
    let items: Vec<Candidate> = view(&snapshot).into_iter().cloned().collect();
    CandidateListResponse::from(items)
}

#[utoipa::path(
    get,
    path = "/api/queue/next",
    responses((status = 200, description = "Next candidate to call, null when nobody is waiting", body = NextCandidateResponse))
)]
#[axum::debug_handler]
pub async fn next_candidate(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let snapshot = state.candidate_service.candidates().await;
    let candidate = queue_service::next_candidate(&snapshot).cloned();
    Ok(Json(NextCandidateResponse {
        candidate,
        warning: None,
    }))
}

#[utoipa::path(
    post,
    path = "/api/queue/call-next",
    responses((status = 200, description = "Candidate that was called, null when nobody is waiting", body = NextCandidateResponse))
)]
#[axum::debug_handler]
pub async fn call_next(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let response = match state.candidate_service.call_next().await? {
        Some(mutation) => NextCandidateResponse {
            candidate: Some(mutation.value),
            warning: mutation.warning.map(|w| w.to_string()),
        },
        None => NextCandidateResponse {
            candidate: None,
            warning: None,
        },
    };
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/queue/arrived",
    responses((status = 200, description = "Arrived candidates, earliest arrival first", body = CandidateListResponse))
)]
#[axum::debug_handler]
pub async fn arrived(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(project(&state, queue_service::arrived).await))
}

#[utoipa::path(
    get,
    path = "/api/queue/pending",
    responses((status = 200, description = "Candidates whose attendance is undecided", body = CandidateListResponse))
)]
#[axum::debug_handler]
pub async fn pending_attendance(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(project(&state, queue_service::pending_attendance).await))
}

#[utoipa::path(
    get,
    path = "/api/queue/called",
    responses((status = 200, description = "Called or interviewed candidates", body = CandidateListResponse))
)]
#[axum::debug_handler]
pub async fn called(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(project(&state, queue_service::called).await))
}

#[utoipa::path(
    get,
    path = "/api/queue/concluded",
    responses((status = 200, description = "Interviewed or no-show candidates", body = CandidateListResponse))
)]
#[axum::debug_handler]
pub async fn concluded(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(project(&state, queue_service::concluded).await))
}

#[utoipa::path(
    get,
    path = "/api/stats",
    responses((status = 200, description = "Counts for the interview day", body = QueueStatsResponse))
)]
#[axum::debug_handler]
pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let snapshot = state.candidate_service.candidates().await;
    Ok(Json(QueueStatsResponse::from(queue_service::stats(&snapshot))))
}
