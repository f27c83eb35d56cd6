use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Markets the dashboard covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    US,
    KR,
}

impl Market {
    pub const ALL: [Market; 2] = [Market::US, Market::KR];

    pub fn code(&self) -> &'static str {
        match self {
            Market::US => "US",
            Market::KR => "KR",
        }
    }

    /// Name used when talking about the market in prompts ("the Korean stock market").
    pub fn display_name(&self) -> &'static str {
        match self {
            Market::US => "US",
            Market::KR => "Korean",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Market::US => "US Market",
            Market::KR => "Korea Market",
        }
    }

    pub fn default_symbol(&self) -> &'static str {
        match self {
            Market::US => "AAPL",
            Market::KR => "005930",
        }
    }

    pub fn default_start_price(&self) -> f64 {
        match self {
            Market::US => 150.0,
            Market::KR => 70_000.0,
        }
    }

    /// Index the heatmap widget is fed from.
    pub fn heatmap_source(&self) -> &'static str {
        match self {
            Market::US => "SPX500",
            Market::KR => "KOSPI",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(Market::US),
            "KR" => Ok(Market::KR),
            other => Err(format!("Unknown market: {}", other)),
        }
    }
}

/// Descriptor served by GET /api/markets
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInfo {
    pub code: Market,
    pub title: String,
    pub path: String,
    pub default_symbol: String,
    pub default_start_price: f64,
    pub heatmap_source: String,
}

impl From<Market> for MarketInfo {
    fn from(market: Market) -> Self {
        Self {
            code: market,
            title: market.title().to_string(),
            path: format!("/{}", market.code().to_ascii_lowercase()),
            default_symbol: market.default_symbol().to_string(),
            default_start_price: market.default_start_price(),
            heatmap_source: market.heatmap_source().to_string(),
        }
    }
}
