mod common;

use axum::http::StatusCode;
use cost_diagnosis::config::Config;
use serde_json::json;

fn record_body() -> serde_json::Value {
    json!({
        "company_name": "株式会社保存",
        "employee_count": 25,
        "email": "hozon@example.co.jp",
        "name": "田中花子",
        "current_services": [
            {
                "categoryName": "ビジネスチャット",
                "serviceName": "Slack",
                "planName": "プロ",
                "licenseCount": 25,
                "price": 10800
            }
        ],
        "current_cost": 270000,
        "gws_cost": 480000,
        "savings": -210000,
        "satisfaction": "満足",
        "feature_comparison": "| 機能比較 | ... |"
    })
}

#[tokio::test]
async fn test_save_and_fetch_roundtrip() {
    let app = common::test_app(Config::default()).await;

    let (status, body) = common::post_json(app.clone(), "/api/results", record_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, fetched) = common::get_json(app, &format!("/api/results/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["company_name"], "株式会社保存");
    assert_eq!(fetched["savings"], -210_000);
    assert_eq!(fetched["current_services"][0]["serviceName"], "Slack");
    assert!(fetched["created_at"].as_str().is_some());
}

#[tokio::test]
async fn test_fetch_unknown_id_is_404() {
    let app = common::test_app(Config::default()).await;
    let (status, body) = common::get_json(app, "/api/results/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found");
}

#[tokio::test]
async fn test_save_without_optional_fields() {
    let app = common::test_app(Config::default()).await;
    let mut body = record_body();
    body.as_object_mut().unwrap().remove("satisfaction");
    body.as_object_mut().unwrap().remove("feature_comparison");

    let (status, response) = common::post_json(app, "/api/results", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);
}
