use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::NaiveDate;
use fundtreasury::application::system::Application;
use fundtreasury::config::Config;
use fundtreasury::infrastructure::FixedClock;
use fundtreasury::interfaces::router;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

async fn test_router(seed: bool) -> Router {
    let mut config = Config::default();
    config.seed_demo_data = seed;
    let app = Application::build(config, Arc::new(FixedClock::on(today())))
        .await
        .unwrap();
    router(Arc::new(app))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn fund_body() -> Value {
    json!({
        "name": "Cerrado Crédito FIDC",
        "tax_id": "11.222.333/0001-44",
        "total_assets": 5000000,
        "liquid_assets": 3000000,
        "liquidity_policy": "moderate",
        "manager": "Cerrado Asset",
        "admin_fee": 0.01
    })
}

#[tokio::test]
async fn test_fund_crud_round() {
    let router = test_router(false).await;

    let (status, created) = send(&router, Method::POST, "/funds", Some(fund_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["status"], "active");
    assert_eq!(created["data"]["redemption_notice_days"], 30);

    let (status, fetched) = send(&router, Method::GET, &format!("/funds/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["name"], "Cerrado Crédito FIDC");

    let (status, updated) = send(
        &router,
        Method::PUT,
        &format!("/funds/{}", id),
        Some(json!({ "status": "suspended", "liquid_assets": "2500000" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], "suspended");
    assert_eq!(updated["data"]["liquid_assets"].as_f64(), Some(2500000.0));

    let (status, listed) = send(&router, Method::GET, "/funds", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 1);
}

#[tokio::test]
async fn test_missing_field_names_the_field() {
    let router = test_router(false).await;
    let mut body = fund_body();
    body.as_object_mut().unwrap().remove("manager");

    let (status, response) = send(&router, Method::POST, "/funds", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert!(response["error"].as_str().unwrap().contains("manager"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let router = test_router(false).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/funds")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_cascades_and_then_404() {
    let router = test_router(true).await;

    let (_, before) = send(&router, Method::GET, "/obligations?fund_id=fund-001", None).await;
    assert!(before["count"].as_u64().unwrap() > 0);

    let (status, deleted) = send(&router, Method::DELETE, "/funds/fund-001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(deleted["message"].as_str().unwrap().contains("deleted"));

    for path in ["/obligations", "/receivables", "/subscriptions"] {
        let (_, listing) = send(&router, Method::GET, &format!("{}?fund_id=fund-001", path), None).await;
        assert_eq!(listing["count"], 0, "{} still references fund-001", path);
    }

    let (status, body) = send(&router, Method::GET, "/funds/fund-001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&router, Method::DELETE, "/funds/fund-001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::GET, "/dashboard/fund-001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_consolidated_report_without_ledger_entries() {
    let router = test_router(false).await;
    send(&router, Method::POST, "/funds", Some(fund_body())).await;

    let (status, report) = send(&router, Method::GET, "/reports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["data"]["total_liquidity"].as_f64(), Some(3000000.0));
    assert_eq!(report["data"]["net_projected_balance"].as_f64(), Some(3000000.0));
}

#[tokio::test]
async fn test_dashboard_starts_at_liquid_assets() {
    let router = test_router(true).await;
    let (_, fund) = send(&router, Method::GET, "/funds/fund-002", None).await;

    let (status, dashboard) = send(&router, Method::GET, "/dashboard/fund-002", None).await;
    assert_eq!(status, StatusCode::OK);
    let d0 = &dashboard["data"]["projections"][0];
    assert_eq!(d0["label"], "D+0");
    assert_eq!(d0["projected_balance"], fund["data"]["liquid_assets"]);
}

#[tokio::test]
async fn test_generate_report_rejects_unknown_type() {
    let router = test_router(true).await;

    let (status, _) = send(
        &router,
        Method::POST,
        "/reports/generate",
        Some(json!({ "report_type": "quarterly" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, report) = send(
        &router,
        Method::POST,
        "/reports/generate",
        Some(json!({ "report_type": "obligations", "fund_ids": ["fund-003"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(report["data"]["obligations"].is_object());
    assert!(report["data"].get("receivables").is_none());
}

#[tokio::test]
async fn test_assets_register_and_list() {
    let router = test_router(false).await;

    let (status, created) = send(
        &router,
        Method::POST,
        "/assets",
        Some(json!({
            "asset_kind": "Precatórios",
            "fixed_rate": 12.5,
            "variable_rate": "IPCA",
            "maturities": ["2027-06-30", "2027-01-31"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["maturities"][0], "2027-01-31");

    let (status, _) = send(&router, Method::POST, "/assets", Some(json!({ "asset_kind": "Bitcoin" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = send(&router, Method::GET, "/assets", None).await;
    assert_eq!(listed["count"], 1);

    let (_, kinds) = send(&router, Method::GET, "/assets/kinds", None).await;
    assert!(kinds["data"]["asset_kinds"].as_array().unwrap().len() > 30);
}

#[tokio::test]
async fn test_health_and_metrics() {
    let router = test_router(true).await;

    let (status, health) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["data"]["status"], "healthy");
    assert_eq!(health["data"]["records"]["funds"], 3);

    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("fundtreasury_http_requests_total"));
}

#[tokio::test]
async fn test_document_stub_is_flagged() {
    let router = test_router(false).await;
    let (status, body) = send(&router, Method::POST, "/documents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["placeholder"], true);
}

#[tokio::test]
async fn test_oversized_amounts_rejected_and_aggregates_stay_up() {
    let router = test_router(true).await;

    let mut huge = fund_body();
    huge["total_assets"] = json!(5e28);
    huge["liquid_assets"] = json!(5e28);
    for _ in 0..2 {
        let (status, body) = send(&router, Method::POST, "/funds", Some(huge.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    let (status, _) = send(
        &router,
        Method::PUT,
        "/funds/fund-001",
        Some(json!({ "liquid_assets": "79000000000000000000000000000" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for path in ["/funds", "/reports", "/dashboard/fund-001", "/outliers"] {
        let (status, body) = send(&router, Method::GET, path, None).await;
        assert_eq!(status, StatusCode::OK, "{} failed", path);
        assert_eq!(body["success"], true);
    }
    let (status, _) = send(&router, Method::POST, "/reports/generate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_outliers_over_seeded_obligations() {
    let router = test_router(true).await;

    let (status, body) = send(&router, Method::GET, "/outliers", None).await;
    assert_eq!(status, StatusCode::OK);

    let obligations = &body["data"]["obligations"];
    assert_eq!(obligations["count"], 8);
    let mean = obligations["mean"].as_f64().unwrap();
    assert!((mean - 997010.41625).abs() < 1e-6);
    assert!((obligations["threshold"].as_f64().unwrap() - mean * 1.5).abs() < 1e-6);

    let flagged = obligations["outliers"].as_array().unwrap();
    let amounts: Vec<f64> = flagged.iter().map(|o| o["amount"].as_f64().unwrap()).collect();
    assert_eq!(amounts, vec![4200000.0, 2400000.0]);
    assert!(flagged[0]["deviation_pct"].is_number());
    assert!(flagged[0]["fund_id"].is_string());

    assert_eq!(body["data"]["receivables"]["count"], 6);
    assert_eq!(body["data"]["multiplier"].as_f64(), Some(1.5));
}

#[tokio::test]
async fn test_report_templates_listed() {
    let router = test_router(false).await;

    let (status, body) = send(&router, Method::GET, "/reports/templates", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 5);
    let types: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["report_type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec!["complete", "funds", "obligations", "receivables", "subscriptions"]
    );
}
