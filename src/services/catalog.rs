use crate::models::{Market, MarketInfo, ResourceCategory, ResourceLink};

const US_RESOURCES: &[ResourceLink] = &[
    ResourceLink { name: "Finviz", url: "https://finviz.com/", description: "Stock screener and market visualization", category: ResourceCategory::Chart },
    ResourceLink { name: "TradingView", url: "https://www.tradingview.com/", description: "Advanced charting software", category: ResourceCategory::Chart },
    ResourceLink { name: "SEC EDGAR", url: "https://www.sec.gov/edgar/searchedgar/companysearch", description: "Official company filings", category: ResourceCategory::Official },
    ResourceLink { name: "Yahoo Finance", url: "https://finance.yahoo.com/", description: "Market news and data", category: ResourceCategory::News },
    ResourceLink { name: "MacroTrends", url: "https://www.macrotrends.net/", description: "Long-term historical data", category: ResourceCategory::Fundamental },
    ResourceLink { name: "FRED", url: "https://fred.stlouisfed.org/", description: "Federal Reserve Economic Data (Macro)", category: ResourceCategory::Fundamental },
    ResourceLink { name: "Seeking Alpha", url: "https://seekingalpha.com/", description: "Crowdsourced equity research & transcripts", category: ResourceCategory::News },
];

const KR_RESOURCES: &[ResourceLink] = &[
    ResourceLink { name: "Naver Finance", url: "https://finance.naver.com/", description: "Comprehensive Korean market data", category: ResourceCategory::News },
    ResourceLink { name: "DART", url: "https://dart.fss.or.kr/", description: "Data Analysis, Retrieval and Transfer System", category: ResourceCategory::Official },
    ResourceLink { name: "KRX Information", url: "http://data.krx.co.kr/", description: "Korea Exchange official data", category: ResourceCategory::Official },
    ResourceLink { name: "Hankyung Consensus", url: "http://consensus.hankyung.com/", description: "Analyst reports and consensus", category: ResourceCategory::Fundamental },
    ResourceLink { name: "AlphaSquare", url: "https://alphasquare.co.kr/", description: "Real-time charting for KR stocks", category: ResourceCategory::Chart },
    ResourceLink { name: "Seibro", url: "https://seibro.or.kr/", description: "Korea Securities Depository Portal", category: ResourceCategory::Official },
    ResourceLink { name: "38 Communication", url: "http://www.38.co.kr/", description: "IPO and unlisted stock market news", category: ResourceCategory::News },
];

/// Curated external links shown next to a market's chart.
pub fn resources_for(market: Market) -> &'static [ResourceLink] {
    match market {
        Market::US => US_RESOURCES,
        Market::KR => KR_RESOURCES,
    }
}

pub fn markets() -> Vec<MarketInfo> {
    Market::ALL.iter().copied().map(MarketInfo::from).collect()
}
