use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use subtle::ConstantTimeEq;

/// Roles admitted to the staff API.
pub const STAFF_ROLES: [&str; 3] = ["admin", "hr", "interviewer"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

fn reject(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "error": code }))).into_response()
}

/// Admits the caller when the bearer token is valid and carries a staff role.
/// The verified [`Claims`] are attached to the request extensions.
pub async fn require_staff(mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return reject(StatusCode::UNAUTHORIZED, "missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return reject(StatusCode::UNAUTHORIZED, "bad_authorization");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return reject(StatusCode::UNAUTHORIZED, "unsupported_scheme");
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => {
            let role = data.claims.role.clone().unwrap_or_default();
            if !STAFF_ROLES.iter().any(|r| r.eq_ignore_ascii_case(&role)) {
                tracing::warn!(sub = %data.claims.sub, role = %role, "Staff gate rejected role");
                return reject(StatusCode::FORBIDDEN, "forbidden");
            }
            req.extensions_mut().insert(data.claims);
            next.run(req).await
        }
        Err(_) => reject(StatusCode::UNAUTHORIZED, "invalid_token"),
    }
}

/// Header carrying the check-in surface's shared secret.
pub const ARRIVAL_SECRET_HEADER: &str = "x-arrival-secret";

/// Admits check-in callers presenting the configured shared secret. Runs
/// before the body is read, so unauthenticated requests never reach parsing.
pub async fn require_arrival_secret(req: Request, next: Next) -> Response {
    let Some(provided) = req.headers().get(ARRIVAL_SECRET_HEADER) else {
        return reject(StatusCode::UNAUTHORIZED, "missing_arrival_secret");
    };
    let expected = crate::config::get_config().arrival_secret.as_bytes();
    if !bool::from(provided.as_bytes().ct_eq(expected)) {
        tracing::warn!(path = %req.uri().path(), "Arrival secret rejected");
        return reject(StatusCode::UNAUTHORIZED, "invalid_arrival_secret");
    }
    next.run(req).await
}

/// Signs a staff token; used by operators' tooling and tests.
pub fn issue_token(secret: &str, sub: &str, role: &str, exp: usize) -> jsonwebtoken::errors::Result<String> {
    let claims = Claims {
        sub: sub.to_string(),
        exp,
        role: Some(role.to_string()),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
