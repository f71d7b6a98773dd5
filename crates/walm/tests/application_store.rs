use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use walm::application::{
    application_router, Application, ApplicationFilter, ApplicationId, ApplicationRepository,
    ApplicationService, RepositoryError, SqliteApplicationRepository,
};

async fn memory_store() -> SqliteApplicationRepository {
    // A single connection keeps every query on the same in-memory database.
    SqliteApplicationRepository::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory store opens")
}

async fn seeded_store() -> SqliteApplicationRepository {
    let store = memory_store().await;
    for application in [
        Application::new("app-1", "Demo"),
        Application::new("app-2", "Guestbook"),
    ] {
        store
            .insert(&application)
            .await
            .expect("seed insert succeeds");
    }
    store
}

#[tokio::test]
async fn listing_returns_the_persisted_set_in_id_order() {
    let store = seeded_store().await;

    let listed = store
        .list(&ApplicationFilter::default())
        .await
        .expect("listing succeeds");

    assert_eq!(
        listed,
        vec![
            Application::new("app-1", "Demo"),
            Application::new("app-2", "Guestbook"),
        ]
    );
}

#[tokio::test]
async fn listing_an_empty_table_is_not_an_error() {
    let store = memory_store().await;

    let listed = store
        .list(&ApplicationFilter::default())
        .await
        .expect("listing succeeds");

    assert!(listed.is_empty());
}

#[tokio::test]
async fn predicates_narrow_the_query() {
    let store = seeded_store().await;

    let filter = ApplicationFilter {
        name: Some("Demo".to_string()),
        ..ApplicationFilter::default()
    };
    let listed = store.list(&filter).await.expect("listing succeeds");

    assert_eq!(listed, vec![Application::new("app-1", "Demo")]);
}

#[tokio::test]
async fn get_finds_the_unique_row() {
    let store = seeded_store().await;

    let found = store
        .get(&ApplicationId::from("app-2"))
        .await
        .expect("row exists");

    assert_eq!(found, Application::new("app-2", "Guestbook"));
}

#[tokio::test]
async fn get_miss_raises_not_found_naming_the_id() {
    let store = seeded_store().await;

    let error = store
        .get(&ApplicationId::from("missing-app"))
        .await
        .expect_err("row is absent");

    let RepositoryError::NotFound(missing) = error else {
        panic!("expected a not-found condition");
    };
    assert!(missing.message.contains("missing-app"));
}

#[tokio::test]
async fn primary_key_rejects_duplicate_ids() {
    let store = seeded_store().await;

    let error = store
        .insert(&Application::new("app-1", "Copy"))
        .await
        .expect_err("id already taken");

    assert!(matches!(error, RepositoryError::Conflict));
}

#[tokio::test]
async fn ensure_schema_is_idempotent() {
    let store = seeded_store().await;

    store.ensure_schema().await.expect("re-run is harmless");

    let listed = store
        .list(&ApplicationFilter::default())
        .await
        .expect("rows survive");
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn list_endpoint_serves_the_table_contents() {
    let store = memory_store().await;
    store
        .insert(&Application::new("app-1", "Demo"))
        .await
        .expect("seed insert succeeds");
    let router = application_router(Arc::new(ApplicationService::new(Arc::new(store))));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/application/")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload, json!([{ "id": "app-1", "name": "Demo" }]));
}

#[tokio::test]
async fn list_endpoint_serves_empty_table_as_empty_array() {
    let store = memory_store().await;
    let router = application_router(Arc::new(ApplicationService::new(Arc::new(store))));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/application/")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload, json!([]));
}
