use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::{arrival_dto, candidate_dto};
use crate::models::candidate;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::candidate_routes::register_candidate,
        super::candidate_routes::list_candidates,
        super::candidate_routes::get_candidate,
        super::candidate_routes::call_candidate,
        super::candidate_routes::mark_interviewed,
        super::candidate_routes::mark_no_show,
        super::candidate_routes::mark_attendance,
        super::queue::next_candidate,
        super::queue::call_next,
        super::queue::arrived,
        super::queue::pending_attendance,
        super::queue::called,
        super::queue::concluded,
        super::queue::stats,
        super::arrival::submit_arrival,
    ),
    components(schemas(
        candidate::Candidate,
        candidate::CandidateStatus,
        candidate_dto::RegisterCandidatePayload,
        candidate_dto::MarkAttendancePayload,
        candidate_dto::CandidateMutationResponse,
        candidate_dto::CandidateListResponse,
        candidate_dto::NextCandidateResponse,
        candidate_dto::QueueStatsResponse,
        arrival_dto::ArrivalSignalPayload,
        arrival_dto::ArrivalQueuedResponse,
    )),
    info(title = "Interview Queue API")
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
