use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use thiserror::Error;

/// Failures talking to the generative text provider.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM features are disabled (no API key configured)")]
    Disabled,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request to LLM provider timed out")]
    Timeout,
    #[error("Rate limited by LLM provider")]
    RateLimited,
    #[error("LLM provider error: {0}")]
    Api(String),
    #[error("Invalid response from LLM provider: {0}")]
    InvalidResponse(String),
}

/// Outcome of a failed equity analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Service error: {0}")]
    Service(#[from] LlmError),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

fn error_body(msg: String) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": msg }))
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let msg = self.to_string();
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, error_body(msg)).into_response(),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, error_body(msg)).into_response(),
            AppError::Analysis(AnalysisError::Service(LlmError::Disabled)) => {
                (StatusCode::SERVICE_UNAVAILABLE, error_body(msg)).into_response()
            }
            AppError::Analysis(AnalysisError::Service(LlmError::RateLimited)) => {
                let mut headers = HeaderMap::new();
                headers.insert("Retry-After", HeaderValue::from_static("60"));
                (StatusCode::TOO_MANY_REQUESTS, headers, error_body(msg)).into_response()
            }
            AppError::Analysis(_) => (StatusCode::BAD_GATEWAY, error_body(msg)).into_response(),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(value: LlmError) -> Self {
        AppError::Analysis(AnalysisError::Service(value))
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        AppError::Validation(value.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        AppError::Validation(value.body_text())
    }
}
