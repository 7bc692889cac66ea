pub mod arrival;
pub mod candidate_routes;
pub mod health;
pub mod openapi;
pub mod queue;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth, cors, rate_limit};
use crate::AppState;

/// Full HTTP surface: staff API behind the bearer gate, the rate-limited
/// check-in endpoint, and the open health/docs routes.
pub fn router(state: AppState, arrival_rps: u32) -> Router {
    let base_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(openapi::openapi_json));

    let staff_api = Router::new()
        .route(
            "/api/candidates",
            get(candidate_routes::list_candidates).post(candidate_routes::register_candidate),
        )
        .route("/api/candidates/:id", get(candidate_routes::get_candidate))
        .route("/api/candidates/:id/call", post(candidate_routes::call_candidate))
        .route(
            "/api/candidates/:id/interviewed",
            post(candidate_routes::mark_interviewed),
        )
        .route("/api/candidates/:id/no-show", post(candidate_routes::mark_no_show))
        .route(
            "/api/candidates/:id/attendance",
            post(candidate_routes::mark_attendance),
        )
        .route("/api/queue/next", get(queue::next_candidate))
        .route("/api/queue/call-next", post(queue::call_next))
        .route("/api/queue/arrived", get(queue::arrived))
        .route("/api/queue/pending", get(queue::pending_attendance))
        .route("/api/queue/called", get(queue::called))
        .route("/api/queue/concluded", get(queue::concluded))
        .route("/api/stats", get(queue::stats))
        .layer(axum::middleware::from_fn(auth::require_staff));

    let check_in_api = Router::new()
        .route("/api/arrivals", post(arrival::submit_arrival))
        .layer(axum::middleware::from_fn(auth::require_arrival_secret))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(arrival_rps),
            rate_limit::rps_middleware,
        ));

    base_routes
        .merge(staff_api)
        .merge(check_in_api)
        .with_state(state)
        .layer(cors::dashboard_cors())
        .layer(TraceLayer::new_for_http())
}
