use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    dto::arrival_dto::{ArrivalQueuedResponse, ArrivalSignalPayload},
    error::Result,
    utils::time,
    AppState,
};

/// Runs behind [`crate::middleware::auth::require_arrival_secret`], so the
/// body is only parsed for callers holding the shared secret.
#[utoipa::path(
    post,
    path = "/api/arrivals",
    request_body = ArrivalSignalPayload,
    params(("x-arrival-secret" = String, Header, description = "Shared secret of the check-in surface")),
    responses(
        (status = 202, description = "Signal queued for matching", body = ArrivalQueuedResponse),
        (status = 400, description = "Missing candidate name"),
        (status = 401, description = "Missing or wrong secret")
    )
)]
pub async fn submit_arrival(
    State(state): State<AppState>,
    Json(payload): Json<ArrivalSignalPayload>,
) -> Result<(StatusCode, Json<ArrivalQueuedResponse>)> {
    payload.validate()?;

    let signal = payload.into_signal(time::now());
    tracing::info!(name = %signal.candidate_name, arrived_at = %signal.arrived_at, "Arrival signal received");
    state.arrivals.submit(signal).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ArrivalQueuedResponse { queued: true }),
    ))
}
