mod common;

use axum::http::StatusCode;
use cost_diagnosis::config::Config;
use serde_json::json;

fn full_form() -> serde_json::Value {
    json!({
        "groupware": "Microsoft 365",
        "groupwarePlan": "Business Standard",
        "groupwareLicenses": 30,
        "videoConference": "Zoom",
        "videoConferencePlan": "プランが分からない",
        "businessChat": "利用していない",
        "storage": "社内サーバー",
        "ai": "ChatGPT",
        "aiPlan": "Plus",
        "aiLicenses": 5,
        "companyName": "株式会社テスト",
        "employeeCount": 30,
        "name": "山田太郎",
        "email": "taro@example.co.jp",
        "satisfaction": "やや不満"
    })
}

#[tokio::test]
async fn test_diagnose_full_form() {
    let app = common::test_app(Config::default()).await;
    let (status, body) = common::post_json(app, "/api/diagnose", full_form()).await;

    assert_eq!(status, StatusCode::OK);

    // Microsoft 365 Business Standard: 18,744 × 30
    // Zoom plan unknown → default プロ: 20,100 × 30 (licenses fall back)
    // 社内サーバー at 30 employees → 50名規模: 400,000 × 30 licenses
    // ChatGPT Plus: 36,000 × 5
    let expected_current = 18_744 * 30 + 20_100 * 30 + 400_000 * 30 + 36_000 * 5;
    assert_eq!(body["currentCost"], expected_current);
    assert_eq!(body["gwsCost"], 19_200 * 30);
    assert_eq!(body["savings"], expected_current - 19_200 * 30);
    assert_eq!(body["employeeCount"], 30);

    let services = body["selectedServices"].as_array().unwrap();
    let categories: Vec<_> = services
        .iter()
        .map(|s| s["categoryName"].as_str().unwrap())
        .collect();
    assert_eq!(
        categories,
        vec!["グループウェア", "ビデオ会議", "クラウドストレージ", "生成AI"]
    );
    assert_eq!(services[2]["planName"], "50名規模");
    assert!(body["unpriced"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_diagnose_nothing_selected() {
    let app = common::test_app(Config::default()).await;
    let form = json!({
        "companyName": "株式会社ゼロ",
        "employeeCount": 7,
        "name": "佐藤",
        "email": "sato@example.jp"
    });

    let (status, body) = common::post_json(app, "/api/diagnose", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentCost"], 0);
    assert_eq!(body["gwsCost"], 19_200 * 7);
    assert_eq!(body["savings"], -19_200 * 7);
    assert!(body["selectedServices"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_diagnose_unknown_service_reported_as_unpriced() {
    let app = common::test_app(Config::default()).await;
    let mut form = full_form();
    form["crmTool"] = json!("自社開発CRM");
    form["crmToolPlan"] = json!("特注");

    let (status, body) = common::post_json(app, "/api/diagnose", form).await;

    assert_eq!(status, StatusCode::OK);
    let unpriced = body["unpriced"].as_array().unwrap();
    assert_eq!(unpriced.len(), 1);
    assert_eq!(unpriced[0]["serviceName"], "自社開発CRM");
    assert_eq!(unpriced[0]["categoryName"], "CRMツール");
}

#[tokio::test]
async fn test_diagnose_validation_failure() {
    let app = common::test_app(Config::default()).await;
    let form = json!({
        "companyName": "",
        "employeeCount": 0,
        "name": "佐藤",
        "email": "not-an-email"
    });

    let (status, body) = common::post_json(app, "/api/diagnose", form).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["type"], "validation_failed");

    let fields: Vec<_> = body["error"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap().to_string())
        .collect();
    assert!(fields.contains(&"companyName".to_string()));
    assert!(fields.contains(&"employeeCount".to_string()));
    assert!(fields.contains(&"email".to_string()));
}

#[tokio::test]
async fn test_diagnose_custom_bundle_price() {
    let mut config = Config::default();
    config.bundle.price_per_user_per_year = 24_000;

    let app = common::test_app(config).await;
    let form = json!({
        "companyName": "株式会社単価",
        "employeeCount": 10,
        "name": "高橋",
        "email": "takahashi@example.co.jp"
    });

    let (_, body) = common::post_json(app, "/api/diagnose", form).await;
    assert_eq!(body["gwsCost"], 240_000);
}
