use axum::{routing::get, Json, Router};
use tracing::info;

use crate::models::widget::{advanced_chart_embed, AdvancedChartOptions, WidgetEmbed};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/advanced-chart", get(get_advanced_chart))
}

/// GET /api/widgets/advanced-chart
pub async fn get_advanced_chart() -> Json<WidgetEmbed<AdvancedChartOptions>> {
    info!("GET /api/widgets/advanced-chart");
    Json(advanced_chart_embed())
}
