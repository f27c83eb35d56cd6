use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::errors::{AnalysisError, LlmError};
use crate::models::{AnalysisResult, Market};
use crate::services::response_schema::{analysis_schema, ResponseSchema};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Returned by the overview call when the provider fails.
pub const OVERVIEW_UNAVAILABLE: &str = "Unable to retrieve market overview.";
/// Returned by the overview call when the provider answers with nothing.
pub const OVERVIEW_EMPTY: &str = "Market data currently unavailable.";

const ANALYST_SYSTEM_INSTRUCTION: &str =
    "You are Odoc AI, a world-class financial analyst specializing in equity markets.";

/// Configuration for LLM service
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// One prompt, optionally constrained to a JSON schema.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub prompt: String,
    pub response_schema: Option<ResponseSchema>,
}

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for a request. An empty string means the provider
    /// answered without content.
    async fn generate_content(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

/// Gemini generateContent request/response structures
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig<'a>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a ResponseSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

fn text_part(text: &str) -> GeminiContent {
    GeminiContent {
        role: None,
        parts: vec![GeminiPart {
            text: Some(text.to_string()),
        }],
    }
}

fn build_gemini_request(request: &GenerationRequest) -> GeminiRequest<'_> {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            ..text_part(&request.prompt)
        }],
        system_instruction: request.system_instruction.as_deref().map(text_part),
        generation_config: request
            .response_schema
            .as_ref()
            .map(|schema| GeminiGenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
    }
}

/// Text of the first candidate, all parts joined.
fn response_text(response: &GeminiResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Gemini provider implementation
pub struct GeminiProvider {
    api_key: String,
    model: String,
    api_base: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate_content(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        info!(
            "Generating content (model: {}, structured: {})",
            self.model,
            request.response_schema.is_some()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&build_gemini_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if status == 429 {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        if let Some(usage) = &body.usage_metadata {
            info!(
                "Content generated. Tokens: {} prompt + {} candidates = {} total",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        Ok(response_text(&body))
    }
}

/// Equity analysis and market overview on top of an optional provider.
///
/// Without an API key the provider stays unset: analysis fails with
/// `LlmError::Disabled` and the overview falls back to a fixed string.
pub struct LlmService {
    config: LlmConfig,
    provider: Option<Arc<dyn LlmProvider>>,
}

impl LlmService {
    pub fn new(config: LlmConfig) -> Self {
        let provider = match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => match GeminiProvider::new(key.to_string(), &config) {
                Ok(provider) => {
                    info!("Initializing LLM service (model: {})", config.model);
                    Some(Arc::new(provider) as Arc<dyn LlmProvider>)
                }
                Err(e) => {
                    error!("Failed to initialize Gemini provider: {}. AI features disabled.", e);
                    None
                }
            },
            Some(_) => {
                warn!("LLM API key is empty. AI features will not work.");
                None
            }
            None => {
                warn!("Missing GEMINI_API_KEY. AI features will not work.");
                None
            }
        };

        Self { config, provider }
    }

    pub fn with_provider(config: LlmConfig, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            config,
            provider: Some(provider),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn provider(&self) -> Result<&Arc<dyn LlmProvider>, LlmError> {
        self.provider.as_ref().ok_or(LlmError::Disabled)
    }

    /// Schema-constrained analysis of one symbol. Single attempt; provider
    /// failures come back as `Service`, unusable output as `Parse`.
    pub async fn request_analysis(
        &self,
        symbol: &str,
        market: Market,
    ) -> Result<AnalysisResult, AnalysisError> {
        let provider = self.provider()?;

        let request = GenerationRequest {
            system_instruction: Some(ANALYST_SYSTEM_INSTRUCTION.to_string()),
            prompt: build_analysis_prompt(symbol, market),
            response_schema: Some(analysis_schema()),
        };

        let text = provider.generate_content(&request).await.map_err(|e| {
            error!("Analysis request for {} ({}) failed: {}", symbol, market, e);
            e
        })?;

        parse_analysis(&text, request.response_schema.as_ref()).map_err(|e| {
            error!("Analysis response for {} ({}) rejected: {}", symbol, market, e);
            e
        })
    }

    /// Short sentiment summary for a market. Never fails.
    pub async fn request_market_overview(&self, market: Market) -> String {
        let provider = match self.provider() {
            Ok(p) => p,
            Err(_) => return OVERVIEW_UNAVAILABLE.to_string(),
        };

        let request = GenerationRequest {
            system_instruction: None,
            prompt: build_overview_prompt(market),
            response_schema: None,
        };

        match provider.generate_content(&request).await {
            Ok(text) if text.trim().is_empty() => OVERVIEW_EMPTY.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Market overview for {} failed: {}", market, e);
                OVERVIEW_UNAVAILABLE.to_string()
            }
        }
    }
}

fn build_analysis_prompt(symbol: &str, market: Market) -> String {
    format!(
        r#"Act as a senior financial analyst, specifically for the {} stock market.
Analyze the stock with ticker/symbol: {}.

Provide a professional assessment including:
1. Recent performance summary.
2. Bullish thesis.
3. Bearish thesis.
4. 3-5 key structural or market risks.
5. A general rating (Buy/Hold/Sell/Neutral) based on current market sentiment.

Ensure the tone is objective and professional."#,
        market.code(),
        symbol
    )
}

fn build_overview_prompt(market: Market) -> String {
    format!(
        "Provide a concise, 3-sentence summary of the current sentiment for the {} stock market today. \
         Focus on major indices and key macro factors.",
        market.display_name()
    )
}

// Models occasionally wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Validate raw model output against `schema` and only then deserialize it.
fn parse_analysis(
    text: &str,
    schema: Option<&ResponseSchema>,
) -> Result<AnalysisResult, AnalysisError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(AnalysisError::Parse("Empty response from LLM provider".to_string()));
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::Parse(format!("Response is not valid JSON: {}", e)))?;

    if let Some(schema) = schema {
        schema
            .validate(&value)
            .map_err(|e| AnalysisError::Parse(format!("Response does not match schema: {}", e)))?;
    }

    serde_json::from_value(value)
        .map_err(|e| AnalysisError::Parse(format!("Response does not match AnalysisResult: {}", e)))
}
