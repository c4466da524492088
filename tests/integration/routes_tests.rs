//! HTTP route tests
//!
//! Exercise the batch endpoint through the actix service: envelope
//! round-trips, the enclosingTransaction flag, the read-only admission
//! guard, and the health endpoints.

use crate::common::{FailingStrategy, RequestFactory, StaticStrategy};
use actix_web::{test, web, App};
use batchgate::config::DatabaseConfig;
use batchgate::server::{routes, AppState};
use batchgate::{BatchRequest, BatchResponse, Config, Database, Method, StrategyRegistry};

async fn app_state(read_only: bool, registry: StrategyRegistry) -> AppState {
    let mut config = Config::default();
    config.gateway.batch.read_only = read_only;

    let database = Database::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connection_timeout: 5,
    })
    .await
    .expect("in-memory database");

    AppState::new(config, database, registry)
}

fn client_registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    registry
        .register(Method::Get, "clients/{clientId}", StaticStrategy::ok(r#"{"clientId": 7}"#))
        .unwrap();
    registry
        .register(Method::Post, "clients", StaticStrategy::ok(r#"{"clientId": 8}"#))
        .unwrap();
    registry
        .register(Method::Post, "loans", FailingStrategy::new("rejected"))
        .unwrap();
    registry
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::batch::configure_routes)
                .configure(routes::health::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn batch_endpoint_returns_sorted_responses() {
    let app = init_app!(app_state(false, client_registry()).await);

    let envelope = vec![
        RequestFactory::root(3, Method::Get, "clients/7"),
        RequestFactory::root(1, Method::Get, "clients/7"),
    ];

    let req = test::TestRequest::post()
        .uri("/v1/batches")
        .set_json(&envelope)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let responses: Vec<BatchResponse> = test::read_body_json(resp).await;
    let ids: Vec<i64> = responses.iter().map(|r| r.request_id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[actix_web::test]
async fn enclosing_transaction_flag_switches_to_rollback_semantics() {
    let app = init_app!(app_state(false, client_registry()).await);

    let envelope = vec![
        RequestFactory::root(1, Method::Post, "clients"),
        RequestFactory::root(2, Method::Post, "loans"),
    ];

    let req = test::TestRequest::post()
        .uri("/v1/batches?enclosingTransaction=true")
        .set_json(&envelope)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let responses: Vec<BatchResponse> = test::read_body_json(resp).await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].request_id, 2);
    assert!(responses[0].body.contains("TRANSACTION_ROLLED_BACK"));
}

#[actix_web::test]
async fn read_only_instance_rejects_writes_before_orchestration() {
    let app = init_app!(app_state(true, client_registry()).await);

    let envelope = vec![RequestFactory::root(1, Method::Post, "clients")];

    let req = test::TestRequest::post()
        .uri("/v1/batches")
        .set_json(&envelope)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn read_only_instance_accepts_all_get_envelopes() {
    let app = init_app!(app_state(true, client_registry()).await);

    let envelope = vec![RequestFactory::root(1, Method::Get, "clients/7")];

    let req = test::TestRequest::post()
        .uri("/v1/batches")
        .set_json(&envelope)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn malformed_envelope_is_rejected_with_400() {
    let app = init_app!(app_state(false, client_registry()).await);

    let req = test::TestRequest::post()
        .uri("/v1/batches")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"[{"requestId": "not-a-number"}]"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn envelope_wire_format_accepts_camel_case_members() {
    let json = r#"[
        {"requestId": 1, "method": "POST", "relativeUrl": "clients",
         "body": "{\"firstname\": \"Petra\"}"},
        {"requestId": 2, "method": "GET", "relativeUrl": "clients/$.clientId",
         "reference": 1}
    ]"#;
    let envelope: Vec<BatchRequest> = serde_json::from_str(json).unwrap();
    assert_eq!(envelope[1].reference, Some(1));

    let app = init_app!(app_state(false, client_registry()).await);
    let req = test::TestRequest::post()
        .uri("/v1/batches")
        .set_json(&envelope)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let responses: Vec<BatchResponse> = test::read_body_json(resp).await;
    assert_eq!(responses.len(), 2);
}

#[actix_web::test]
async fn health_endpoints_respond() {
    let app = init_app!(app_state(false, StrategyRegistry::new()).await);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/health").to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/detailed").to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/version").to_request(),
    )
    .await;
    assert!(resp.status().is_success());
}
