use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::services::llm_service::{LlmConfig, DEFAULT_API_BASE, DEFAULT_MODEL};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            None => 3000,
        };

        let api_base = lookup("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        url::Url::parse(&api_base)
            .with_context(|| format!("GEMINI_API_BASE is not a valid URL: '{}'", api_base))?;

        let timeout_secs = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("LLM_TIMEOUT_SECS must be a number of seconds, got '{}'", raw))?,
            None => 30,
        };

        let non_blank = |k: &String| !k.trim().is_empty();
        let api_key = lookup("GEMINI_API_KEY")
            .filter(non_blank)
            .or_else(|| lookup("API_KEY").filter(non_blank));

        Ok(Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            llm: LlmConfig {
                api_key,
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_base,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
