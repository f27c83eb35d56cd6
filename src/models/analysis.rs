use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Market;

/// Overall rating attached to an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
    Neutral,
}

impl Recommendation {
    pub const ALL: [Recommendation; 4] = [
        Recommendation::Buy,
        Recommendation::Hold,
        Recommendation::Sell,
        Recommendation::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
            Recommendation::Neutral => "Neutral",
        }
    }
}

/// AI-generated equity assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub bullish_case: String,
    pub bearish_case: String,
    pub key_risks: Vec<String>,
    pub recommendation: Recommendation,
}

/// Request body for POST /api/markets/:market/analysis
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub symbol: String,
}

/// Analysis tagged with the symbol it was issued for.
///
/// Clients compare `symbol` against what they currently display and drop
/// responses that arrive after the user has moved on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEnvelope {
    pub request_id: Uuid,
    pub symbol: String,
    pub market: Market,
    pub analysis: AnalysisResult,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisEnvelope {
    pub fn new(symbol: String, market: Market, analysis: AnalysisResult) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            symbol,
            market,
            analysis,
            generated_at: Utc::now(),
        }
    }

    pub fn is_for(&self, displayed_symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(displayed_symbol.trim())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketOverview {
    pub market: Market,
    pub overview: String,
}
