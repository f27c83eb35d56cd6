use serde::Serialize;

use super::Market;

pub const HEATMAP_SCRIPT_SRC: &str =
    "https://s3.tradingview.com/external-embedding/embed-widget-stock-heatmap.js";
pub const ADVANCED_CHART_SCRIPT_SRC: &str =
    "https://s3.tradingview.com/external-embedding/embed-widget-advanced-chart.js";

/// Script to mount plus the options object it reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetEmbed<T> {
    pub script_src: &'static str,
    pub options: T,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapOptions {
    pub exchanges: Vec<String>,
    pub data_source: String,
    pub grouping: String,
    pub block_size: String,
    pub block_color: String,
    pub locale: String,
    pub symbol_url: String,
    pub color_theme: String,
    pub has_top_bar: bool,
    pub is_data_set_enabled: bool,
    pub is_zoom_enabled: bool,
    pub has_symbol_tooltip: bool,
    pub width: String,
    pub height: String,
}

impl HeatmapOptions {
    pub fn for_market(market: Market) -> Self {
        Self {
            exchanges: Vec::new(),
            data_source: market.heatmap_source().to_string(),
            grouping: "sector".to_string(),
            block_size: "market_cap_basic".to_string(),
            block_color: "change".to_string(),
            locale: "en".to_string(),
            symbol_url: String::new(),
            color_theme: "dark".to_string(),
            has_top_bar: false,
            is_data_set_enabled: false,
            is_zoom_enabled: true,
            has_symbol_tooltip: true,
            width: "100%".to_string(),
            height: "100%".to_string(),
        }
    }
}

// The advanced chart widget takes snake_case keys, unlike the heatmap.
#[derive(Debug, Clone, Serialize)]
pub struct AdvancedChartOptions {
    pub autosize: bool,
    pub symbol: String,
    pub interval: String,
    pub timezone: String,
    pub theme: String,
    pub style: String,
    pub locale: String,
    pub enable_publishing: bool,
    pub allow_symbol_change: bool,
    pub calendar: bool,
    pub support_host: String,
}

impl Default for AdvancedChartOptions {
    fn default() -> Self {
        Self {
            autosize: true,
            symbol: "NASDAQ:AAPL".to_string(),
            interval: "D".to_string(),
            timezone: "Etc/UTC".to_string(),
            theme: "dark".to_string(),
            style: "1".to_string(),
            locale: "en".to_string(),
            enable_publishing: false,
            allow_symbol_change: true,
            calendar: false,
            support_host: "https://www.tradingview.com".to_string(),
        }
    }
}

pub fn heatmap_embed(market: Market) -> WidgetEmbed<HeatmapOptions> {
    WidgetEmbed {
        script_src: HEATMAP_SCRIPT_SRC,
        options: HeatmapOptions::for_market(market),
    }
}

pub fn advanced_chart_embed() -> WidgetEmbed<AdvancedChartOptions> {
    WidgetEmbed {
        script_src: ADVANCED_CHART_SCRIPT_SRC,
        options: AdvancedChartOptions::default(),
    }
}
