//! Language model provider clients
//!
//! Each client implements [`InferenceGateway`] over the provider's HTTP API.
//! [`build_gateway`] picks one from configuration.

mod gemini_client;
mod openai_client;

pub use gemini_client::GeminiClient;
pub use openai_client::OpenAiClient;

use std::sync::Arc;

use crate::core::config::{LlmConfig, LlmProvider};
use crate::shared::llm::InferenceGateway;

/// Create the configured gateway
pub fn build_gateway(config: &LlmConfig) -> Result<Arc<dyn InferenceGateway>, String> {
    let gateway: Arc<dyn InferenceGateway> = match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(
            &config.base_url,
            config.api_key.clone(),
            config.model.clone(),
            config.request_timeout,
        )?),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(
            &config.base_url,
            config.api_key.clone(),
            config.model.clone(),
            config.request_timeout,
        )?),
    };

    Ok(gateway)
}

/// Build the shared HTTP client with a per-request timeout
fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .user_agent(concat!("promptsaz-core/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}

/// Read the body of a non-2xx response into a provider error
async fn provider_error(response: reqwest::Response) -> crate::shared::llm::InferenceError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let body: String = body.chars().take(500).collect();
    tracing::warn!("LLM provider returned status {}: {}", status, body);
    crate::shared::llm::InferenceError::Provider { status, body }
}
