use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use interview_queue::{
    build_state,
    config::{Config, StorageBackend, CONFIG},
    database::kv::MemoryKeyValueStore,
    middleware::auth::issue_token,
    routes,
    services::arrival_service::run_arrival_worker,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

const JWT_SECRET: &str = "test_secret_key";
const ARRIVAL_SECRET: &str = "arrival_test";

fn init_test_config() {
    let _ = CONFIG.set(Config {
        server_address: "127.0.0.1:0".into(),
        jwt_secret: JWT_SECRET.into(),
        arrival_secret: ARRIVAL_SECRET.into(),
        storage_backend: StorageBackend::Memory,
        database_url: None,
        store_path: String::new(),
        store_key: "candidates".into(),
        arrival_rps: 1000,
        arrival_queue_capacity: 16,
    });
}

async fn setup_app() -> Router {
    init_test_config();
    let (state, arrivals) = build_state(Arc::new(MemoryKeyValueStore::new()), "candidates", 16).await;
    tokio::spawn(run_arrival_worker(arrivals, state.candidate_service.clone()));
    routes::router(state, 1000)
}

fn token(role: &str) -> String {
    let exp = (chrono::Utc::now().timestamp() + 3600) as usize;
    issue_token(JWT_SECRET, "staff-1", role, exp).expect("token")
}

fn staff_request(method: &str, uri: &str, body: Option<JsonValue>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token("hr")));
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        staff_request(
            "POST",
            "/api/candidates",
            Some(json!({
                "name": name,
                "email": email,
                "phone": "+55 11 98888-0000",
                "interviewDate": "2026-10-18",
                "interviewTime": "10:00:00",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["candidate"]["status"], "waiting");
    assert!(body.get("warning").is_none());
    body["candidate"]["id"].as_str().unwrap().to_string()
}

async fn send_arrival(app: &Router, name: &str, secret: Option<&str>) -> StatusCode {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/arrivals")
        .header("content-type", "application/json");
    if let Some(secret) = secret {
        builder = builder.header("x-arrival-secret", secret);
    }
    let req = builder
        .body(Body::from(json!({ "candidateName": name }).to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap().status()
}

async fn wait_for_next(app: &Router) -> JsonValue {
    for _ in 0..100 {
        let (_, body) = send(app, staff_request("GET", "/api/queue/next", None)).await;
        if !body["candidate"].is_null() {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("arrival was never applied");
}

#[tokio::test]
async fn staff_routes_require_a_staff_token() {
    let app = setup_app().await;

    let req = Request::builder()
        .uri("/api/candidates")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/api/candidates")
        .header("authorization", format!("Bearer {}", token("guest")))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = Request::builder()
        .uri("/api/candidates")
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn interview_day_flow() {
    let app = setup_app().await;
    let ana = register(&app, "Ana Souza", "ana@example.com").await;
    let bruno = register(&app, "Bruno Lima", "bruno@example.com").await;

    let (_, body) = send(&app, staff_request("GET", "/api/queue/next", None)).await;
    assert!(body["candidate"].is_null());

    assert_eq!(send_arrival(&app, "ana souza", None).await, StatusCode::UNAUTHORIZED);
    assert_eq!(send_arrival(&app, "ana souza", Some("wrong")).await, StatusCode::UNAUTHORIZED);
    assert_eq!(send_arrival(&app, "ana souza", Some(ARRIVAL_SECRET)).await, StatusCode::ACCEPTED);

    let next = wait_for_next(&app).await;
    assert_eq!(next["candidate"]["id"], ana.as_str());
    assert!(next["candidate"]["arrivedAt"].is_string());

    let (status, body) = send(
        &app,
        staff_request("POST", &format!("/api/candidates/{}/attendance", bruno), Some(json!({ "attended": false }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["candidate"]["status"], "no_show");
    assert!(body["candidate"].get("arrivedAt").is_none());

    let (status, body) = send(&app, staff_request("POST", "/api/queue/call-next", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["candidate"]["id"], ana.as_str());
    assert_eq!(body["candidate"]["status"], "called");
    assert!(body["candidate"]["calledAt"].is_string());

    let (_, body) = send(&app, staff_request("GET", "/api/queue/next", None)).await;
    assert!(body["candidate"].is_null());
    let (_, body) = send(&app, staff_request("POST", "/api/queue/call-next", None)).await;
    assert!(body["candidate"].is_null());

    let (status, _) = send(&app, staff_request("POST", &format!("/api/candidates/{}/call", bruno), None)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        staff_request("POST", &format!("/api/candidates/{}/interviewed", ana), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["candidate"]["status"], "interviewed");

    let (_, body) = send(&app, staff_request("GET", "/api/queue/arrived", None)).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], ana.as_str());

    let (_, body) = send(&app, staff_request("GET", "/api/queue/concluded", None)).await;
    assert_eq!(body["total"], 2);

    let (_, body) = send(&app, staff_request("GET", "/api/queue/pending", None)).await;
    assert_eq!(body["total"], 0);

    let (_, body) = send(&app, staff_request("GET", "/api/stats", None)).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["interviewed"], 1);
    assert_eq!(body["noShow"], 1);
    assert_eq!(body["successRate"], 50.0);

    let (_, body) = send(&app, staff_request("GET", "/api/candidates?status=no_show", None)).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], bruno.as_str());

    let (_, body) = send(&app, staff_request("GET", "/api/candidates?search=SOUZA", None)).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn rejects_bad_input_and_unknown_candidates() {
    let app = setup_app().await;

    let (status, _) = send(
        &app,
        staff_request(
            "POST",
            "/api/candidates",
            Some(json!({
                "name": "Carla",
                "email": "carla-at-example",
                "interviewDate": "2026-10-18",
                "interviewTime": "10:00:00",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        staff_request(
            "POST",
            "/api/candidates",
            Some(json!({ "name": "Carla", "email": "carla@example.com" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = uuid::Uuid::new_v4();
    let (status, _) = send(&app, staff_request("POST", &format!("/api/candidates/{}/call", unknown), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, staff_request("GET", &format!("/api/candidates/{}", unknown), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, staff_request("GET", "/api/candidates?status=present", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, staff_request("GET", "/api/candidates", None)).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn arrival_secret_is_checked_before_the_body() {
    let app = setup_app().await;

    let malformed = |secret: Option<&str>| {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/arrivals")
            .header("content-type", "application/json");
        if let Some(secret) = secret {
            builder = builder.header("x-arrival-secret", secret);
        }
        builder.body(Body::from("{not json")).unwrap()
    };

    let (status, body) = send(&app, malformed(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_arrival_secret");

    let (status, body) = send(&app, malformed(Some("wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_arrival_secret");

    let (status, _) = send(&app, malformed(Some(ARRIVAL_SECRET))).await;
    assert!(status.is_client_error());
    assert_ne!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = setup_app().await;
    let req = Request::builder()
        .uri("/api/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/queue/next"].is_object());
}
