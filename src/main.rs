use tokio::net::TcpListener;

use odoc_backend::app;
use odoc_backend::config::AppConfig;
use odoc_backend::logging::{init_logging, LoggingConfig};
use odoc_backend::services::llm_service::LlmService;
use odoc_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    // Missing credentials are logged here once; AI routes degrade instead of failing startup.
    let llm_service = LlmService::new(config.llm.clone());
    if llm_service.is_enabled() {
        tracing::info!("AI analysis enabled (model: {})", llm_service.model());
    }

    let app = app::create_app(AppState::new(llm_service));

    let listener = TcpListener::bind(&config.addr).await?;
    tracing::info!("Odoc backend running at http://{}/", config.addr);
    axum::serve(listener, app).await?;

    Ok(())
}
