use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::widget::{heatmap_embed, HeatmapOptions, WidgetEmbed};
use crate::models::{
    AnalysisEnvelope, AnalysisRequest, Market, MarketInfo, MarketOverview, ResourceLink,
    SeriesParams, SeriesResponse,
};
use crate::services::{catalog, series_generator};
use crate::state::AppState;

pub const DEFAULT_SERIES_DAYS: u32 = 90;
pub const MAX_SERIES_DAYS: u32 = 1000;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_markets))
        .route("/:market/series", get(get_series))
        .route("/:market/overview", get(get_overview))
        .route("/:market/analysis", post(analyze_symbol))
        .route("/:market/resources", get(get_resources))
        .route("/:market/heatmap", get(get_heatmap))
}

fn parse_market(raw: &str) -> Result<Market, AppError> {
    raw.parse::<Market>().map_err(AppError::NotFound)
}

fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// GET /api/markets
pub async fn list_markets() -> Json<Vec<MarketInfo>> {
    info!("GET /api/markets");
    Json(catalog::markets())
}

/// GET /api/markets/:market/series?symbol=NVDA&days=90
/// Simulated price history with MA20 envelope
pub async fn get_series(
    Path(market): Path<String>,
    params: Result<Query<SeriesParams>, QueryRejection>,
) -> Result<Json<SeriesResponse>, AppError> {
    let market = parse_market(&market)?;
    let Query(params) = params?;
    let days = params.days.unwrap_or(DEFAULT_SERIES_DAYS);
    if days > MAX_SERIES_DAYS {
        return Err(AppError::Validation(format!(
            "days must be at most {}, got {}",
            MAX_SERIES_DAYS, days
        )));
    }

    let searched = params
        .symbol
        .as_deref()
        .map(normalize_symbol)
        .filter(|s| !s.is_empty());
    let start_price = series_generator::start_price_for(market, searched.as_deref());
    let symbol = searched.unwrap_or_else(|| market.default_symbol().to_string());

    info!("GET /api/markets/{}/series - {} ({} days)", market, symbol, days);

    let points = series_generator::generate(days, start_price);

    Ok(Json(SeriesResponse {
        symbol,
        market,
        start_price,
        simulated: true,
        points,
    }))
}

/// GET /api/markets/:market/overview
/// Best-effort sentiment summary; falls back to a fixed message
pub async fn get_overview(
    State(state): State<AppState>,
    Path(market): Path<String>,
) -> Result<Json<MarketOverview>, AppError> {
    let market = parse_market(&market)?;
    info!("GET /api/markets/{}/overview", market);

    let overview = state.llm_service.request_market_overview(market).await;
    Ok(Json(MarketOverview { market, overview }))
}

/// POST /api/markets/:market/analysis
/// AI equity analysis, tagged with the symbol it was requested for
pub async fn analyze_symbol(
    State(state): State<AppState>,
    Path(market): Path<String>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisEnvelope>, AppError> {
    let market = parse_market(&market)?;
    let Json(data) = body?;
    let symbol = normalize_symbol(&data.symbol);
    if symbol.is_empty() {
        return Err(AppError::Validation("symbol must not be empty".to_string()));
    }

    info!("POST /api/markets/{}/analysis - {}", market, symbol);

    let analysis = state
        .llm_service
        .request_analysis(&symbol, market)
        .await
        .map_err(|e| {
            error!("Failed to analyze {} ({}): {}", symbol, market, e);
            e
        })?;

    Ok(Json(AnalysisEnvelope::new(symbol, market, analysis)))
}

/// GET /api/markets/:market/resources
pub async fn get_resources(
    Path(market): Path<String>,
) -> Result<Json<&'static [ResourceLink]>, AppError> {
    let market = parse_market(&market)?;
    info!("GET /api/markets/{}/resources", market);
    Ok(Json(catalog::resources_for(market)))
}

/// GET /api/markets/:market/heatmap
pub async fn get_heatmap(
    Path(market): Path<String>,
) -> Result<Json<WidgetEmbed<HeatmapOptions>>, AppError> {
    let market = parse_market(&market)?;
    info!("GET /api/markets/{}/heatmap", market);
    Ok(Json(heatmap_embed(market)))
}
