use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use cost_diagnosis::{
    catalog,
    config::Config,
    server::{create_router, AppState},
    store::DiagnosisStore,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

/// Build the real router against the shipped catalog, an in-memory
/// database, and the given config.
pub async fn test_app(config: Config) -> Router {
    let price_catalog = catalog::load_catalog(Path::new("data/services-pricing.json")).unwrap();
    let default_plans =
        catalog::load_default_plans(Path::new("data/default-plans.json")).unwrap();

    let pool = sqlx::SqlitePool::connect(":memory:").await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    let state = AppState {
        config: Arc::new(config),
        catalog: Arc::new(price_catalog),
        defaults: Arc::new(default_plans),
        http_client: reqwest::Client::new(),
        store: Arc::new(DiagnosisStore::with_pool(pool)),
    };

    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    create_router(state, Arc::new(recorder.handle()))
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
