use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::candidate_dto::{
        CandidateListQuery, CandidateListResponse, CandidateMutationResponse,
        MarkAttendancePayload, RegisterCandidatePayload,
    },
    error::Result,
    services::queue_service,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body = RegisterCandidatePayload,
    responses(
        (status = 201, description = "Candidate registered in waiting status", body = CandidateMutationResponse),
        (status = 400, description = "Invalid registration data")
    )
)]
#[axum::debug_handler]
pub async fn register_candidate(
    State(state): State<AppState>,
    Json(payload): Json<RegisterCandidatePayload>,
) -> Result<impl IntoResponse> {
    let mutation = state.candidate_service.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CandidateMutationResponse::from(mutation)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/candidates",
    params(
        ("search" = Option<String>, Query, description = "Substring of name or email"),
        ("status" = Option<String>, Query, description = "waiting, called, interviewed, no_show or all"),
        ("date" = Option<String>, Query, description = "Interview date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Candidates in registration order", body = CandidateListResponse),
        (status = 400, description = "Unknown status filter")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let filter = query.into_filter()?;
    let snapshot = state.candidate_service.candidates().await;
    let items: Vec<_> = queue_service::filter(&snapshot, &filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(CandidateListResponse::from(items)))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate found"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.candidate(id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/call",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate called", body = CandidateMutationResponse),
        (status = 404, description = "Candidate not found"),
        (status = 409, description = "Candidate is not waiting")
    )
)]
#[axum::debug_handler]
pub async fn call_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let mutation = state.candidate_service.call(id).await?;
    Ok(Json(CandidateMutationResponse::from(mutation)))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/interviewed",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Interview recorded", body = CandidateMutationResponse),
        (status = 404, description = "Candidate not found"),
        (status = 409, description = "Candidate has not been called")
    )
)]
#[axum::debug_handler]
pub async fn mark_interviewed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let mutation = state.candidate_service.mark_interviewed(id).await?;
    Ok(Json(CandidateMutationResponse::from(mutation)))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/no-show",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "No-show recorded", body = CandidateMutationResponse),
        (status = 404, description = "Candidate not found"),
        (status = 409, description = "Candidate already has a final outcome")
    )
)]
#[axum::debug_handler]
pub async fn mark_no_show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let mutation = state.candidate_service.mark_no_show(id).await?;
    Ok(Json(CandidateMutationResponse::from(mutation)))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/attendance",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    request_body = MarkAttendancePayload,
    responses(
        (status = 200, description = "Attendance recorded", body = CandidateMutationResponse),
        (status = 404, description = "Candidate not found"),
        (status = 409, description = "Attendance already marked")
    )
)]
#[axum::debug_handler]
pub async fn mark_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarkAttendancePayload>,
) -> Result<impl IntoResponse> {
    let mutation = state
        .candidate_service
        .mark_attendance(id, payload.attended)
        .await?;
    Ok(Json(CandidateMutationResponse::from(mutation)))
}
