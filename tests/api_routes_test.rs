/// API tests driving the full router in-process.
///
/// The generative provider is replaced with scripted mocks, so nothing here
/// touches the network.
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use odoc_backend::app::create_app;
use odoc_backend::errors::LlmError;
use odoc_backend::services::llm_service::{
    GenerationRequest, LlmConfig, LlmProvider, LlmService, OVERVIEW_UNAVAILABLE,
};
use odoc_backend::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct ScriptedProvider {
    analysis: fn() -> Result<String, LlmError>,
    overview: fn() -> Result<String, LlmError>,
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate_content(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        if request.response_schema.is_some() {
            (self.analysis)()
        } else {
            (self.overview)()
        }
    }
}

fn app_with(
    analysis: fn() -> Result<String, LlmError>,
    overview: fn() -> Result<String, LlmError>,
) -> Router {
    let provider = Arc::new(ScriptedProvider { analysis, overview });
    create_app(AppState::new(LlmService::with_provider(LlmConfig::default(), provider)))
}

fn healthy_app() -> Router {
    app_with(
        || {
            Ok(r#"{"summary":"Memory upcycle.","bullishCase":"HBM demand.","bearishCase":"Cyclical pricing.","keyRisks":["pricing","capex","geopolitics"],"recommendation":"Buy"}"#.to_string())
        },
        || Ok("Indices edged higher on easing rate fears.".to_string()),
    )
}

fn disabled_app() -> Router {
    create_app(AppState::new(LlmService::new(LlmConfig::default())))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Health and catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let response = healthy_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_markets() {
    let (status, body) = send(healthy_app(), get("/api/markets")).await;
    assert_eq!(status, StatusCode::OK);
    let markets = body.as_array().unwrap();
    assert_eq!(markets.len(), 2);
    assert_eq!(markets[0]["code"], "US");
    assert_eq!(markets[1]["defaultSymbol"], "005930");
}

#[tokio::test]
async fn test_resources_and_widgets() {
    let (status, body) = send(healthy_app(), get("/api/markets/kr/resources")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Naver Finance");
    assert_eq!(body[0]["category"], "News");

    let (status, body) = send(healthy_app(), get("/api/markets/KR/heatmap")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["options"]["dataSource"], "KOSPI");

    let (status, body) = send(healthy_app(), get("/api/widgets/advanced-chart")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["options"]["symbol"], "NASDAQ:AAPL");
}

#[tokio::test]
async fn test_unknown_market_is_404() {
    let (status, body) = send(healthy_app(), get("/api/markets/jp/resources")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("JP"));
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_series_defaults() {
    let (status, body) = send(healthy_app(), get("/api/markets/us/series")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["startPrice"], 150.0);
    assert_eq!(body["simulated"], true);

    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 90);
    let first = &points[0];
    for key in ["date", "price", "volume", "movingAverage20", "upperBand", "lowerBand"] {
        assert!(first.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(first["date"].as_str().unwrap().len(), 10);
}

#[tokio::test]
async fn test_series_for_searched_symbol() {
    let (status, body) = send(
        healthy_app(),
        get("/api/markets/kr/series?symbol=000660&days=30"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "000660");
    assert_eq!(body["startPrice"], 56000.0);
    assert_eq!(body["points"].as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn test_series_searching_landing_symbol_uses_length_seed() {
    let (status, body) = send(healthy_app(), get("/api/markets/us/series?symbol=aapl")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["startPrice"], 140.0);
}

#[tokio::test]
async fn test_series_bad_query_is_json_400() {
    for uri in ["/api/markets/us/series?days=-1", "/api/markets/us/series?days=abc"] {
        let (status, body) = send(healthy_app(), get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].as_str().is_some(), "{} returned {}", uri, body);
    }
}

#[tokio::test]
async fn test_series_zero_days_is_empty() {
    let (status, body) = send(healthy_app(), get("/api/markets/us/series?days=0")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["points"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_series_rejects_too_many_days() {
    let (status, _) = send(healthy_app(), get("/api/markets/us/series?days=5000")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Analysis and overview
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_analysis_success_is_tagged_with_symbol() {
    let (status, body) = send(
        healthy_app(),
        post_json("/api/markets/kr/analysis", r#"{"symbol":" 000660 "}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "000660");
    assert_eq!(body["market"], "KR");
    assert!(body["requestId"].as_str().is_some());
    assert_eq!(body["analysis"]["recommendation"], "Buy");
    assert_eq!(body["analysis"]["keyRisks"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_analysis_blank_symbol_is_400() {
    let (status, _) = send(
        healthy_app(),
        post_json("/api/markets/us/analysis", r#"{"symbol":"  "}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analysis_bad_body_is_json_400() {
    let requests = vec![
        Request::post("/api/markets/us/analysis").body(Body::empty()).unwrap(),
        post_json("/api/markets/us/analysis", "{not json"),
        post_json("/api/markets/us/analysis", r#"{"ticker":"AAPL"}"#),
    ];

    for request in requests {
        let (status, body) = send(healthy_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
    }
}

#[tokio::test]
async fn test_analysis_malformed_response_is_502() {
    let app = app_with(
        || Ok(r#"{"summary":"s","bullishCase":"b","bearishCase":"r","keyRisks":["a","b","c"]}"#.to_string()),
        || Ok("fine".to_string()),
    );
    let (status, body) = send(app, post_json("/api/markets/us/analysis", r#"{"symbol":"AAPL"}"#)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().starts_with("Parse error"));
}

#[tokio::test]
async fn test_analysis_rate_limited_is_429() {
    let app = app_with(|| Err(LlmError::RateLimited), || Ok("fine".to_string()));
    let response = app
        .oneshot(post_json("/api/markets/us/analysis", r#"{"symbol":"AAPL"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers().get("Retry-After").unwrap(), "60");
}

#[tokio::test]
async fn test_analysis_without_credentials_is_503() {
    let (status, body) = send(
        disabled_app(),
        post_json("/api/markets/us/analysis", r#"{"symbol":"AAPL"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().starts_with("Service error"));
}

#[tokio::test]
async fn test_overview_success() {
    let (status, body) = send(healthy_app(), get("/api/markets/us/overview")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["market"], "US");
    assert_eq!(body["overview"], "Indices edged higher on easing rate fears.");
}

#[tokio::test]
async fn test_overview_failure_still_200_with_fallback() {
    let app = app_with(
        || Ok("unused".to_string()),
        || Err(LlmError::Network("connection refused".to_string())),
    );
    let (status, body) = send(app, get("/api/markets/kr/overview")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overview"], OVERVIEW_UNAVAILABLE);

    let (status, body) = send(disabled_app(), get("/api/markets/us/overview")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overview"], OVERVIEW_UNAVAILABLE);
}
