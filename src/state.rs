use std::sync::Arc;

use crate::services::llm_service::LlmService;

#[derive(Clone)]
pub struct AppState {
    pub llm_service: Arc<LlmService>,
}

impl AppState {
    pub fn new(llm_service: LlmService) -> Self {
        Self {
            llm_service: Arc::new(llm_service),
        }
    }
}
