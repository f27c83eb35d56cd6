use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// One simulated trading day with its envelope indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,        // serialized as YYYY-MM-DD
    pub price: f64,
    pub volume: u64,
    #[serde(rename = "movingAverage20")]
    pub moving_average_20: f64,
    pub upper_band: f64,
    pub lower_band: f64,
}

/// Query parameters for GET /api/markets/:market/series
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesParams {
    pub symbol: Option<String>,
    pub days: Option<u32>,
}

/// Generated series tagged with what it was generated for
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponse {
    pub symbol: String,
    pub market: super::Market,
    pub start_price: f64,
    pub simulated: bool,
    pub points: Vec<PricePoint>,
}
