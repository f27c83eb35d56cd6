mod analysis;
mod market;
mod price_point;
mod resource;
pub mod widget;

pub use analysis::{AnalysisEnvelope, AnalysisRequest, AnalysisResult, MarketOverview, Recommendation};
pub use market::{Market, MarketInfo};
pub use price_point::{PricePoint, SeriesParams, SeriesResponse};
pub use resource::{ResourceCategory, ResourceLink};
