//! HTTP API integration tests
//!
//! Envelope, status codes and routing for /api/questions, /api/links and /health.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use tempfile::TempDir;

use migration::entities::link;
use muka::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use muka::api::services::{AppStartTime, api_routes, health_routes, json_config};
use muka::config::DatabaseConfig;
use muka::services::{LinkService, QuestionCatalog};
use muka::storage::{NewLink, SeaOrmStorage, StorageFactory};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, sea_query::Expr};

// =============================================================================
// Test Setup
// =============================================================================

struct TestContext {
    _dir: TempDir,
    storage: Arc<SeaOrmStorage>,
    catalog: Arc<QuestionCatalog>,
    link_service: Arc<LinkService>,
}

async fn setup() -> TestContext {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        database_url: format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("api_test.db").display()
        ),
        ..Default::default()
    };
    let storage = StorageFactory::create(&config)
        .await
        .expect("Failed to create storage");

    let catalog = Arc::new(QuestionCatalog::new(storage.clone()));
    catalog.seed_defaults().await.expect("Failed to seed");

    let link_service = Arc::new(LinkService::new(
        storage.clone(),
        "http://localhost:3000",
        3,
    ));

    TestContext {
        _dir: dir,
        storage,
        catalog,
        link_service,
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .wrap(TimingMiddleware)
                .wrap(RequestIdMiddleware)
                .app_data(json_config())
                .app_data(web::Data::new($ctx.storage.clone()))
                .app_data(web::Data::new($ctx.catalog.clone()))
                .app_data(web::Data::new($ctx.link_service.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: Utc::now(),
                }))
                .service(api_routes())
                .service(health_routes()),
        )
        .await
    };
}

fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["success"], false, "body: {}", body);
    assert_eq!(body["error"]["code"], code, "body: {}", body);
    assert!(body.get("data").is_none());
}

async fn mark_used_in_db(storage: &SeaOrmStorage, hash: &str) {
    link::Entity::update_many()
        .col_expr(link::Column::Used, Expr::value(true))
        .filter(link::Column::Hash.eq(hash))
        .exec(storage.get_db())
        .await
        .unwrap();
}

// =============================================================================
// GET /api/questions
// =============================================================================

#[tokio::test]
async fn test_list_questions() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = TestRequest::get().uri("/api/questions").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body.get("error").is_none());

    let questions = body["data"].as_array().unwrap();
    assert_eq!(questions.len(), 7);

    let orders: Vec<i64> = questions.iter().map(|q| q["order"].as_i64().unwrap()).collect();
    let mut sorted = orders.clone();
    sorted.sort_unstable();
    assert_eq!(orders, sorted);

    let first = &questions[0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["template"], "나한테 어울리는 음악은?");
    assert_eq!(first["category"], "relationship");
    let created_at = first["createdAt"].as_str().unwrap();
    assert!(created_at.ends_with('Z'));
    assert!(DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[tokio::test]
async fn test_reseed_does_not_duplicate_questions() {
    let ctx = setup().await;
    ctx.catalog.seed_defaults().await.unwrap();
    ctx.catalog.seed_defaults().await.unwrap();
    let app = init_app!(ctx);

    let req = TestRequest::get().uri("/api/questions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
}

// =============================================================================
// POST /api/links
// =============================================================================

#[tokio::test]
async fn test_create_link() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/links")
        .set_json(json!({ "questionId": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    let hash = body["data"]["hash"].as_str().unwrap();
    assert_eq!(hash.len(), 10);
    assert_eq!(
        body["data"]["shareUrl"],
        format!("http://localhost:3000/r/{}", hash)
    );

    let expires_at = DateTime::parse_from_rfc3339(body["data"]["expiresAt"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc);
    let drift = (expires_at - (Utc::now() + Duration::days(7))).num_seconds().abs();
    assert!(drift < 10);
}

#[tokio::test]
async fn test_create_link_invalid_payloads() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let payloads = [
        json!({ "questionId": 0 }),
        json!({ "questionId": -3 }),
        json!({ "questionId": "1" }),
        json!({ "questionId": null }),
        json!({ "questionId": 1.5 }),
        json!({}),
        json!({ "question_id": 1 }),
    ];

    for payload in payloads {
        let req = TestRequest::post()
            .uri("/api/links")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
        let body: Value = test::read_body_json(resp).await;
        assert_error(&body, "INVALID_REQUEST");
    }

    assert_eq!(ctx.storage.count_links().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_link_accepts_whole_valued_float() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    for raw in ["{\"questionId\": 1.0}", "{\"questionId\": 1e0}"] {
        let req = TestRequest::post()
            .uri("/api/links")
            .insert_header(("Content-Type", "application/json"))
            .set_payload(raw)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED, "payload {}", raw);

        let body: Value = test::read_body_json(resp).await;
        let hash = body["data"]["hash"].as_str().unwrap().to_string();
        let req = TestRequest::get()
            .uri(&format!("/api/links/{}", hash))
            .to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["data"]["question"]["id"], 1);
    }

    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"questionId\": 1.5}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "INVALID_REQUEST");
    assert_eq!(
        body["error"]["message"],
        "questionId is required and must be a number"
    );
}

#[tokio::test]
async fn test_create_link_malformed_json() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"questionId\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "INVALID_REQUEST");
    assert_eq!(
        body["error"]["message"],
        "questionId is required and must be a number"
    );
}

#[tokio::test]
async fn test_create_link_unknown_question() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/links")
        .set_json(json!({ "questionId": 999 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "INVALID_QUESTION_ID");
    assert_eq!(body["error"]["message"], "Question with ID 999 not found");
}

fn taken_hash() -> String {
    "TakenHash1".to_string()
}

#[tokio::test]
async fn test_create_link_exhausted_collisions_is_opaque() {
    let mut ctx = setup().await;
    ctx.storage
        .insert_link(&NewLink::new("TakenHash1", 1, Utc::now()))
        .await
        .unwrap();
    ctx.link_service = Arc::new(
        LinkService::new(ctx.storage.clone(), "http://localhost:3000", 3)
            .with_hash_generator(taken_hash),
    );
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/links")
        .set_json(json!({ "questionId": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "Failed to create link");
    assert_eq!(ctx.storage.count_links().await.unwrap(), 1);
}

// =============================================================================
// GET /api/links/{hash}
// =============================================================================

#[tokio::test]
async fn test_round_trip_through_http() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/links")
        .set_json(json!({ "questionId": 6 }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let hash = created["data"]["hash"].as_str().unwrap().to_string();

    let req = TestRequest::get()
        .uri(&format!("/api/links/{}", hash))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["hash"], hash.as_str());
    assert_eq!(body["data"]["used"], false);
    assert_eq!(body["data"]["expired"], false);
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["question"]["id"], 6);
}

#[tokio::test]
async fn test_get_link_not_found() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = TestRequest::get().uri("/api/links/NeverIssd0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "LINK_NOT_FOUND");
    assert_eq!(body["error"]["message"], "Link not found");
}

#[tokio::test]
async fn test_get_link_empty_hash_is_bad_request() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = TestRequest::get().uri("/api/links/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "INVALID_REQUEST");
    assert_eq!(body["error"]["message"], "Invalid link hash");
}

#[tokio::test]
async fn test_get_link_expired() {
    let ctx = setup().await;
    ctx.storage
        .insert_link(&NewLink::new("OldLink001", 1, Utc::now() - Duration::days(30)))
        .await
        .unwrap();
    let app = init_app!(ctx);

    let req = TestRequest::get().uri("/api/links/OldLink001").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GONE);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "LINK_EXPIRED");
}

#[tokio::test]
async fn test_get_link_used() {
    let ctx = setup().await;
    let issued = ctx.link_service.issue_link(2).await.unwrap();
    mark_used_in_db(&ctx.storage, &issued.hash).await;
    let app = init_app!(ctx);

    let req = TestRequest::get()
        .uri(&format!("/api/links/{}", issued.hash))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "LINK_ALREADY_USED");
}

#[tokio::test]
async fn test_expired_and_used_reports_expired() {
    let ctx = setup().await;
    ctx.storage
        .insert_link(&NewLink::new("OldUsed001", 1, Utc::now() - Duration::days(8)))
        .await
        .unwrap();
    mark_used_in_db(&ctx.storage, "OldUsed001").await;
    let app = init_app!(ctx);

    let req = TestRequest::get().uri("/api/links/OldUsed001").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GONE);
}

// =============================================================================
// Infrastructure failures
// =============================================================================

#[tokio::test]
async fn test_storage_failure_is_opaque() {
    let ctx = setup().await;
    let app = init_app!(ctx);
    ctx.storage.close().await.unwrap();

    let req = TestRequest::get().uri("/api/questions").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "DATABASE_ERROR");
    assert_eq!(body["error"]["message"], "Failed to fetch questions");

    let req = TestRequest::post()
        .uri("/api/links")
        .set_json(json!({ "questionId": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "Failed to create link");

    let req = TestRequest::get().uri("/api/links/Whatever01").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "Failed to fetch link");
}

// =============================================================================
// Health & middleware
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["checks"]["storage"]["backend"], "sqlite");
    assert_eq!(body["data"]["checks"]["storage"]["questions_count"], 7);
}

#[tokio::test]
async fn test_health_check_unhealthy_after_close() {
    let ctx = setup().await;
    let app = init_app!(ctx);
    ctx.storage.close().await.unwrap();

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_liveness() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_request_id_header() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = TestRequest::get().uri("/api/questions").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(generated.len(), 36);

    let req = TestRequest::get()
        .uri("/api/questions")
        .insert_header(("X-Request-ID", "edge-abc_123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "edge-abc_123");

    let req = TestRequest::get()
        .uri("/api/questions")
        .insert_header(("X-Request-ID", "bad id with spaces"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ne!(resp.headers().get("x-request-id").unwrap(), "bad id with spaces");
}
