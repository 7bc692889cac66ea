use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::middleware::auth::ARRIVAL_SECRET_HEADER;

/// Browser dashboards and the check-in kiosk are served from other origins.
pub fn dashboard_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(ARRIVAL_SECRET_HEADER),
        ])
        .allow_origin(Any)
}
